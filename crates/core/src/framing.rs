//! Wire framing for compressed output.
//!
//! # Format
//!
//! ```text
//! +-----------------------------+
//! | count[0]   (4 bytes)        |  u32 big-endian, occurrences of byte 0x00
//! | count[1]   (4 bytes)        |
//! | ...                         |
//! | count[255] (4 bytes)        |
//! | count[256] (4 bytes)        |  end-of-stream sentinel, always 1
//! +-----------------------------+
//! | body (variable)             |  concatenated codes, MSB-first, then the
//! |                             |  sentinel code, zero-padded to a byte
//! +-----------------------------+
//! ```
//!
//! There is no length field for the body. The decoder stops at the sentinel,
//! so padding bits after it are never interpreted.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, HuffmanError, Result};
use crate::frequency::{FrequencyTable, Symbol, SENTINEL, SYMBOL_COUNT};

/// Size of the frequency header in bytes.
pub const HEADER_SIZE: usize = SYMBOL_COUNT * 4;

/// Write the 257 counts as big-endian u32 values in symbol order.
///
/// # Errors
/// `HuffmanError::CountOverflow` if a count does not fit in 32 bits.
pub fn write_header(table: &FrequencyTable, writer: &mut BitWriter) -> Result<()> {
    for (symbol, &count) in table.counts().iter().enumerate() {
        let count = u32::try_from(count).map_err(|_| HuffmanError::CountOverflow {
            symbol: symbol as Symbol,
        })?;
        writer.write_u32(count);
    }
    Ok(())
}

/// Read the 257-count header from the start of `reader`.
///
/// # Errors
/// - `Error::TruncatedHeader` if fewer than [`HEADER_SIZE`] bytes remain
/// - `Error::InvalidSentinelCount` if the sentinel slot is not 1
pub fn read_header(reader: &mut BitReader<'_>) -> Result<FrequencyTable> {
    let available = reader.bits_remaining() / 8;
    if available < HEADER_SIZE {
        return Err(Error::TruncatedHeader {
            required: HEADER_SIZE,
            actual: available,
        });
    }

    let mut counts = [0u32; SYMBOL_COUNT];
    for slot in counts.iter_mut() {
        *slot = reader.read_u32()?;
    }

    let sentinel = counts[SENTINEL as usize];
    if sentinel != 1 {
        return Err(Error::InvalidSentinelCount { count: sentinel });
    }

    Ok(FrequencyTable::from_counts(counts))
}

/// Parse only the header of a compressed buffer.
pub fn parse_header(bytes: &[u8]) -> Result<FrequencyTable> {
    read_header(&mut BitReader::new(bytes))
}
