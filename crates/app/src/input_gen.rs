//! Sample input for the `demo` command.
//!
//! The generated data mixes sections that Huffman coding handles very
//! differently, so the demo's ratio reflects more than one regime:
//! - long runs of a single byte (about one bit per byte)
//! - English-like text over a small alphabet
//! - geometrically skewed bytes (a few values dominate)
//! - uniform random bytes (no gain, header overhead only)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SECTION_BYTES: usize = 4096;

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "that", "for", "it", "as", "with", "was", "on",
    "stream", "code", "tree", "byte", "bit", "symbol", "header", "weight", "leaf",
];

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
///
/// The same seed and size always produce the same bytes.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let len = SECTION_BYTES.min(size_bytes - data.len());
        match rng.gen_range(0..10) {
            0..=1 => push_run(&mut rng, &mut data, len),
            2..=5 => push_text(&mut rng, &mut data, len),
            6..=8 => push_skewed(&mut rng, &mut data, len),
            _ => data.extend((0..len).map(|_| rng.gen::<u8>())),
        }
    }

    data.truncate(size_bytes);
    data
}

fn push_run(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, len: usize) {
    let byte: u8 = rng.gen();
    data.resize(data.len() + len, byte);
}

fn push_text(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, len: usize) {
    let end = data.len() + len;
    while data.len() < end {
        let word = WORDS[rng.gen_range(0..WORDS.len())];
        data.extend_from_slice(word.as_bytes());
        data.push(if rng.gen_ratio(1, 12) { b'\n' } else { b' ' });
    }
    data.truncate(end);
}

fn push_skewed(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, len: usize) {
    let base: u8 = rng.gen();
    for _ in 0..len {
        // each step away from `base` is half as likely as the previous one
        let mut offset = 0u8;
        while offset < 16 && rng.gen_bool(0.5) {
            offset += 1;
        }
        data.push(base.wrapping_add(offset));
    }
}
