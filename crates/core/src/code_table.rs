//! Symbol to bit-string mapping derived from a [`HuffmanTree`].
//!
//! A left edge contributes a `0`, a right edge a `1`; a leaf's code is the
//! path from the root. Codes are root-to-leaf paths in a full binary tree, so
//! no code is a prefix of another.

use std::fmt;

use crate::error::HuffmanError;
use crate::frequency::{FrequencyTable, Symbol, SYMBOL_COUNT};
use crate::tree::{HuffmanTree, Node};

/// Longest code a single [`Code`] can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A code word: the low `len` bits of `value`, emitted most significant first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    value: u64,
    len: u8,
}

impl Code {
    pub fn new(value: u64, len: u8) -> Self {
        Self { value, len }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits in emission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| (self.value >> i) & 1 == 1)
    }

    /// Whether `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .value
                .checked_shr(u32::from(other.len - self.len))
                .unwrap_or(0)
                == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Walk `tree` once and record the path to every leaf.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf sits deeper than
    /// [`MAX_CODE_LEN`].
    pub fn derive(tree: &HuffmanTree) -> Result<Self, HuffmanError> {
        let mut codes = [None; SYMBOL_COUNT];
        let mut stack = vec![(tree.root(), Code::new(0, 0))];

        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(code),
                Node::Internal { left, right, .. } => {
                    let len = code.len() + 1;
                    if len > MAX_CODE_LEN {
                        return Err(HuffmanError::CodeLengthTooLong { length: len });
                    }
                    stack.push((right, Code::new((code.value << 1) | 1, len as u8)));
                    stack.push((left, Code::new(code.value << 1, len as u8)));
                }
            }
        }

        Ok(Self { codes })
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(symbol as usize)?.as_ref()
    }

    /// Assigned codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.as_ref().map(|c| (s as Symbol, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Exact number of body bits `table` encodes to, sentinel included.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(s, code)| table.count(s) * code.len() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::SENTINEL;

    fn table_for(input: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::build(input)).unwrap();
        CodeTable::derive(&tree).unwrap()
    }

    #[test]
    fn test_code_display_and_bits() {
        let code = Code::new(0b0110, 4);
        assert_eq!(code.to_string(), "0110");
        assert_eq!(code.bits().collect::<Vec<_>>(), vec![false, true, true, false]);
        assert!(Code::new(0b01, 2).is_prefix_of(&code));
        assert!(!Code::new(0b1, 1).is_prefix_of(&code));
        assert!(!code.is_prefix_of(&Code::new(0b01, 2)));
    }

    #[test]
    fn test_two_symbols_get_one_bit_each() {
        let codes = table_for(&[0x41, 0x41, 0x41]);

        let a = codes.get(0x41).unwrap();
        let eos = codes.get(SENTINEL).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(eos.len(), 1);
        assert_ne!(a, eos);
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_empty_input_sentinel_code() {
        let codes = table_for(&[]);
        assert_eq!(codes.get(SENTINEL).unwrap().to_string(), "1");
    }

    #[test]
    fn test_absent_symbols_have_no_code() {
        let codes = table_for(b"hello");
        assert!(codes.get(b'z' as Symbol).is_none());
        assert!(codes.get(b'l' as Symbol).is_some());
        assert!(codes.iter().all(|(_, c)| !c.is_empty()));
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let mut input = vec![b'e'; 500];
        input.extend_from_slice(b"xyzqj");
        let codes = table_for(&input);

        let common = codes.get(b'e' as Symbol).unwrap().len();
        for rare in b"xyzqj" {
            assert!(codes.get(*rare as Symbol).unwrap().len() >= common);
        }
    }

    #[test]
    fn test_prefix_free_all_bytes() {
        let input: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; (b as usize % 7) + 1]).collect();
        let codes = table_for(&input);
        assert_eq!(codes.len(), SYMBOL_COUNT);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_encoded_bits() {
        let input = b"AAA";
        let table = FrequencyTable::build(input);
        let codes = CodeTable::derive(&HuffmanTree::build(&table).unwrap()).unwrap();
        // three one-bit literals plus a one-bit sentinel
        assert_eq!(codes.encoded_bits(&table), 4);
    }

    #[test]
    fn test_fibonacci_counts_stay_within_limit() {
        // fibonacci-like weights push the tree far deeper than a balanced one
        let mut counts = [0u32; SYMBOL_COUNT];
        let mut fib = (1u32, 1u32);
        for slot in counts.iter_mut().take(46) {
            *slot = fib.0;
            fib = (fib.1, fib.0.saturating_add(fib.1));
        }
        counts[SENTINEL as usize] = 1;

        let tree = HuffmanTree::build(&FrequencyTable::from_counts(counts)).unwrap();
        assert!(tree.depth() > 20);
        assert!(tree.depth() <= MAX_CODE_LEN);

        let codes = CodeTable::derive(&tree).unwrap();
        assert_eq!(codes.len(), 47);
        assert!(codes.is_prefix_free());
    }
}
