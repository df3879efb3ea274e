//! Bit-level reader and writer over in-memory buffers.
//!
//! Both sides work MSB-first: the first bit written lands in the most
//! significant bit of the first byte. Multi-byte integers are big-endian,
//! which is what the frequency header uses.
//!
//! # Padding Rules
//! - `BitWriter::finish` zero-fills the unused low bits of the last byte
//! - `BitReader` cannot tell padding from data; the codec relies on the
//!   end-of-stream symbol instead of a bit count
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_u32(1028);
//! writer.write_bits(0b101, 3).unwrap();
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0x00, 0x00, 0x04, 0x04, 0b1010_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_u32().unwrap(), 1028);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a growable byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8; a full accumulator is flushed immediately
/// - unused low bits of `bit_buffer` are zero
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bit_buffer |= chunk << (free - take);
            self.bit_count += take as u8;
            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= take;
        }

        Ok(())
    }

    /// Write one whole byte, regardless of current bit alignment.
    pub fn write_byte(&mut self, byte: u8) {
        if self.bit_count == 0 {
            self.bytes.push(byte);
            return;
        }
        let used = self.bit_count;
        self.bytes.push(self.bit_buffer | (byte >> used));
        self.bit_buffer = byte << (8 - used);
    }

    /// Write a 32-bit big-endian integer.
    pub fn write_u32(&mut self, value: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte);
        }
    }

    /// Flush the partial byte (zero-padded) and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Total number of bits written, including the partial byte.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Whether the next write starts on a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a borrowed byte slice.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Ok(bit == 1)
    }

    /// Read up to 64 bits, most significant first.
    ///
    /// Nothing is consumed when the request fails.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.data[self.bit_position / 8];
            let offset = self.bit_position % 8;
            let available = 8 - offset;
            let take = remaining.min(available);

            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (available - take)) & mask;
            result = (result << take) | bits as u64;

            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read 8 bits as a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read a 32-bit big-endian integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_bits(32)? as u32)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if every bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}
