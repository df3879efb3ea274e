//! Error types for the huffpack codec.
//!
//! Compression and decompression never panic on bad input. Every failure is
//! reported as a distinct variant so callers can map it to their own surface
//! (exit codes, HTTP statuses, ...).

use thiserror::Error;

/// Top-level error type for all codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree or code table construction failed
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Compressed input is too short to hold the frequency header
    #[error("truncated header: need at least {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    /// Bit stream ran out before the end-of-stream symbol was decoded
    #[error("truncated body: bit stream ended after {symbols_decoded} symbols without end-of-stream marker")]
    TruncatedBody { symbols_decoded: usize },

    /// Header carries a sentinel count other than 1
    #[error("invalid end-of-stream count in header: expected 1, got {count}")]
    InvalidSentinelCount { count: u32 },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (e.g., more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman tree and code table errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// Code length exceeds what a single code word can hold
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },

    /// A byte value occurs more often than the 32-bit header can record
    #[error("count for symbol {symbol} does not fit in 32 bits")]
    CountOverflow { symbol: u16 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
