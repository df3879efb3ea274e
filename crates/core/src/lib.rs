//! huffpack-core: lossless byte compression with static Huffman coding
//!
//! Output is self-describing: a fixed 1028-byte header of symbol counts,
//! followed by the bit-packed codes of the input and an end-of-stream symbol.
//! The decoder rebuilds the tree from the counts, so the tree shape itself is
//! never transmitted.
//!
//! # Architecture
//!
//! - `bitio`: MSB-first bit reader/writer
//! - `frequency`: per-symbol counts, sentinel included
//! - `heap`: min-heap ordering tree nodes by weight
//! - `tree`: arena-backed Huffman tree
//! - `code_table`: symbol to code mapping
//! - `framing`: header layout on the wire
//! - `codec`: `compress` / `decompress`
//! - `metrics`: counters for callers that want to report on runs
//!
//! # Example
//! ```
//! let compressed = huffpack_core::compress(b"abracadabra").unwrap();
//! let restored = huffpack_core::decompress(&compressed).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod framing;
pub mod frequency;
pub mod heap;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use codec::{analyze, compress, decompress, CodecReport};
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, Symbol, SENTINEL};
