//! Whole-buffer compression and decompression.
//!
//! Compress: count bytes, build the tree, derive codes, then write the
//! header, one code per input byte, and the sentinel code. Decompress reads
//! the header back, rebuilds the same tree and walks it bit by bit until the
//! sentinel leaf comes up.
//!
//! Each call owns its table, tree and codes; nothing is shared between calls.

use crate::bitio::{BitReader, BitWriter};
use crate::code_table::{Code, CodeTable};
use crate::error::{Error, Result};
use crate::framing::{read_header, write_header, HEADER_SIZE};
use crate::frequency::{FrequencyTable, SENTINEL};
use crate::tree::{HuffmanTree, Node};

/// Compress `input` into a self-describing buffer.
///
/// # Errors
/// Only capacity limits: a byte value occurring more than `u32::MAX` times,
/// or a code longer than 64 bits. Neither is reachable below 4 GiB of input.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let table = FrequencyTable::build(input);
    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::derive(&tree)?;

    let body_bytes = bits_to_bytes(codes.encoded_bits(&table));
    let mut writer = BitWriter::with_capacity(HEADER_SIZE + body_bytes);
    write_header(&table, &mut writer)?;

    // dense lookup for the hot loop; absent bytes never occur in `input`
    let mut literal = [Code::default(); 256];
    for (symbol, code) in codes.iter().filter(|&(s, _)| s < SENTINEL) {
        literal[symbol as usize] = *code;
    }

    for &byte in input {
        let code = literal[byte as usize];
        writer.write_bits(code.value(), code.len())?;
    }

    let eos = codes.get(SENTINEL).copied().unwrap_or_default();
    writer.write_bits(eos.value(), eos.len())?;

    Ok(writer.finish())
}

/// Recover the original bytes from the output of [`compress`].
///
/// Bytes after the sentinel's final byte are ignored.
///
/// # Errors
/// - `Error::TruncatedHeader` if `input` is shorter than the header
/// - `Error::InvalidSentinelCount` if the header was not produced by `compress`
/// - `Error::TruncatedBody` if the bits run out before the sentinel
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(input);
    let table = read_header(&mut reader)?;
    let tree = HuffmanTree::build(&table)?;

    // every symbol costs at least one bit, so the body bounds the output
    let expected = table.total().saturating_sub(1);
    let bound = expected.min(reader.bits_remaining() as u64) as usize;
    let mut output = Vec::with_capacity(bound);

    loop {
        let mut node = tree.root();
        let symbol = loop {
            match *tree.node(node) {
                Node::Leaf { symbol, .. } => break symbol,
                Node::Internal { left, right, .. } => {
                    let bit = reader.read_bit().map_err(|_| Error::TruncatedBody {
                        symbols_decoded: output.len(),
                    })?;
                    node = if bit { right } else { left };
                }
            }
        };

        if symbol == SENTINEL {
            return Ok(output);
        }
        output.push(symbol as u8);
    }
}

/// Size figures for compressing a buffer, computed without encoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecReport {
    pub input_bytes: usize,
    /// Literal byte values present in the input
    pub distinct_bytes: usize,
    /// Longest code in bits
    pub max_code_len: usize,
    /// Body length in bits, sentinel included, before padding
    pub body_bits: u64,
    /// Exact length `compress` would return
    pub output_bytes: usize,
}

impl CodecReport {
    /// Compressed size over original size; 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average body bits per input byte, ignoring the header.
    pub fn bits_per_byte(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.body_bits as f64 / self.input_bytes as f64
        }
    }
}

/// Work out what [`compress`] would produce for `input`.
pub fn analyze(input: &[u8]) -> Result<CodecReport> {
    let table = FrequencyTable::build(input);
    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::derive(&tree)?;
    let body_bits = codes.encoded_bits(&table);

    Ok(CodecReport {
        input_bytes: input.len(),
        distinct_bytes: table.present_symbols().filter(|&s| s != SENTINEL).count(),
        max_code_len: tree.depth(),
        body_bits,
        output_bytes: HEADER_SIZE + bits_to_bytes(body_bits),
    })
}

fn bits_to_bytes(bits: u64) -> usize {
    bits.div_ceil(8) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_text() {
        let input = b"hello world! this is a test of the codec.";
        let compressed = compress(input).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(compressed.len(), HEADER_SIZE + 1);
        // sentinel code "1" followed by padding
        assert_eq!(compressed[HEADER_SIZE], 0b1000_0000);
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_three_identical_bytes() {
        let compressed = compress(&[0x41, 0x41, 0x41]).unwrap();
        // four one-bit codes fit in a single body byte
        assert_eq!(compressed.len(), HEADER_SIZE + 1);
        assert_eq!(decompress(&compressed).unwrap(), vec![0x41, 0x41, 0x41]);
    }

    #[test]
    fn test_analyze_matches_compress() {
        let inputs: [&[u8]; 4] = [b"", b"a", b"abracadabra", &[0u8; 4096]];
        for input in inputs {
            let report = analyze(input).unwrap();
            let compressed = compress(input).unwrap();
            assert_eq!(report.output_bytes, compressed.len());
            assert_eq!(report.input_bytes, input.len());
        }
    }

    #[test]
    fn test_analyze_figures() {
        let report = analyze(b"AAA").unwrap();
        assert_eq!(report.distinct_bytes, 1);
        assert_eq!(report.max_code_len, 1);
        assert_eq!(report.body_bits, 4);
        assert!((report.bits_per_byte() - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(analyze(&[]).unwrap().ratio(), 0.0);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let input = b"trailing garbage after the sentinel";
        let mut compressed = compress(input).unwrap();
        compressed.extend_from_slice(&[0xFF; 8]);
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_truncated_body() {
        let input = b"some data that will be cut short";
        let compressed = compress(input).unwrap();
        let result = decompress(&compressed[..compressed.len() - 1]);
        assert!(matches!(result, Err(Error::TruncatedBody { .. })));
    }

    #[test]
    fn test_header_only() {
        let compressed = compress(b"xyz").unwrap();
        let result = decompress(&compressed[..HEADER_SIZE]);
        assert!(matches!(
            result,
            Err(Error::TruncatedBody { symbols_decoded: 0 })
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            decompress(&[0u8; 100]),
            Err(Error::TruncatedHeader { actual: 100, .. })
        ));
    }

    #[test]
    fn test_header_with_huge_counts() {
        // claims billions of symbols but carries a two-byte body
        let mut compressed = compress(b"ab").unwrap();
        compressed[0..4].copy_from_slice(&u32::MAX.to_be_bytes());
        let result = decompress(&compressed);
        assert!(result.is_ok() || matches!(result, Err(Error::TruncatedBody { .. })));
    }
}
