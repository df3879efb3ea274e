//! Byte frequency counting.
//!
//! The table has one slot per symbol: 256 literal byte values plus the
//! end-of-stream sentinel at index 256, whose count is always 1. The same
//! table is what gets written to the wire as the header, so the decoder can
//! rebuild an identical tree without the tree shape ever being serialized.

/// A symbol handled by the tree: a literal byte (0-255) or [`SENTINEL`].
pub type Symbol = u16;

/// End-of-stream marker, never present in real input.
pub const SENTINEL: Symbol = 256;

/// Number of distinct symbols, literals plus the sentinel.
pub const SYMBOL_COUNT: usize = 257;

/// Occurrence counts indexed by symbol.
///
/// # Invariants
/// - a table built from input has `count(SENTINEL) == 1`
/// - every literal count equals the occurrences of that byte in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count every byte of `input` and reserve the sentinel slot.
    ///
    /// Empty input yields all zeros except the sentinel.
    pub fn build(input: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in input {
            counts[byte as usize] += 1;
        }
        counts[SENTINEL as usize] = 1;
        Self { counts }
    }

    /// Wrap counts exactly as read from a header.
    ///
    /// No invariant is enforced here; the codec validates the sentinel slot.
    pub fn from_counts(counts: [u32; SYMBOL_COUNT]) -> Self {
        Self {
            counts: counts.map(u64::from),
        }
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u64; SYMBOL_COUNT] {
        &self.counts
    }

    /// Symbols with a non-zero count, in ascending order.
    pub fn present_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..SYMBOL_COUNT as Symbol).filter(move |&s| self.counts[s as usize] > 0)
    }

    /// Number of symbols with a non-zero count, sentinel included.
    pub fn distinct_symbols(&self) -> usize {
        self.present_symbols().count()
    }

    /// Sum of all counts, sentinel included.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
