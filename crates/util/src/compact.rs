//! SCALE compact integers.
//!
//! The two low bits of the first byte select the mode:
//!
//! | mode | range | layout |
//! |---|---|---|
//! | `0b00` | `0..2^6` | one byte, value in the upper six bits |
//! | `0b01` | `2^6..2^14` | two bytes LE, value `>> 2` |
//! | `0b10` | `2^14..2^30` | four bytes LE, value `>> 2` |
//! | `0b11` | `2^30..` | upper six bits = byte count - 4, then the value LE |
//!
//! Decoding only accepts the shortest encoding of a value.

use scale_types_buffers::{BufferError, Reader, Writer};
use thiserror::Error;

/// Largest number of value bytes in big-integer mode (`u128`).
pub const MAX_COMPACT_BYTES: usize = 16;

const SINGLE_MAX: u128 = 1 << 6;
const TWO_MAX: u128 = 1 << 14;
const FOUR_MAX: u128 = 1 << 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompactError {
    #[error("truncated compact prefix: {0}")]
    Truncated(#[from] BufferError),
    #[error("compact big-integer mode declares {0} bytes, at most 16 supported")]
    TooWide(usize),
    #[error("non-canonical compact encoding of {0}")]
    NonCanonical(u128),
}

/// Encodes `value` in its shortest compact form.
///
/// ```
/// use scale_types_util::compact_to_u8a;
///
/// assert_eq!(compact_to_u8a(1), vec![0x04]);
/// assert_eq!(compact_to_u8a(64), vec![0x01, 0x01]);
/// assert_eq!(compact_to_u8a(1 << 30), vec![0x03, 0x00, 0x00, 0x00, 0x40]);
/// ```
pub fn compact_to_u8a(value: u128) -> Vec<u8> {
    let mut writer = Writer::with_capacity(1 + MAX_COMPACT_BYTES);
    write_compact(&mut writer, value);
    writer.flush()
}

/// Appends the compact form of `value` to `writer`.
pub fn write_compact(writer: &mut Writer, value: u128) {
    if value < SINGLE_MAX {
        writer.u8((value as u8) << 2);
    } else if value < TWO_MAX {
        writer.u16(((value as u16) << 2) | 0b01);
    } else if value < FOUR_MAX {
        writer.u32(((value as u32) << 2) | 0b10);
    } else {
        let width = MAX_COMPACT_BYTES - (value.leading_zeros() as usize / 8);
        writer.u8((((width - 4) as u8) << 2) | 0b11);
        writer.buf(&value.to_le_bytes()[..width]);
    }
}

/// Decodes a compact integer from the front of `input`.
///
/// Returns `(consumed, value)`.
pub fn compact_from_u8a(input: &[u8]) -> Result<(usize, u128), CompactError> {
    let mut reader = Reader::new(input);
    let first = reader.peek()?;
    let value = match first & 0b11 {
        0b00 => {
            reader.skip(1)?;
            u128::from(first >> 2)
        }
        0b01 => {
            let value = u128::from(reader.u16()? >> 2);
            if value < SINGLE_MAX {
                return Err(CompactError::NonCanonical(value));
            }
            value
        }
        0b10 => {
            let value = u128::from(reader.u32()? >> 2);
            if value < TWO_MAX {
                return Err(CompactError::NonCanonical(value));
            }
            value
        }
        _ => {
            let width = usize::from(first >> 2) + 4;
            if width > MAX_COMPACT_BYTES {
                return Err(CompactError::TooWide(width));
            }
            reader.skip(1)?;
            let bytes = reader.buf(width)?;
            let mut arr = [0u8; MAX_COMPACT_BYTES];
            arr[..width].copy_from_slice(bytes);
            let value = u128::from_le_bytes(arr);
            if value < FOUR_MAX || bytes[width - 1] == 0 {
                return Err(CompactError::NonCanonical(value));
            }
            value
        }
    };
    Ok((reader.position(), value))
}

/// Prefixes `input` with its compact-encoded length.
pub fn compact_add_length(input: &[u8]) -> Vec<u8> {
    let mut writer = Writer::with_capacity(input.len() + 5);
    write_compact(&mut writer, input.len() as u128);
    writer.buf(input);
    writer.flush()
}

/// Reads a compact length prefix and the payload it announces.
///
/// Returns `(consumed, payload)`, where `consumed` covers prefix and payload.
pub fn compact_strip_length(input: &[u8]) -> Result<(usize, Vec<u8>), CompactError> {
    let (offset, length) = compact_from_u8a(input)?;
    let mut reader = Reader::new(&input[offset..]);
    let length = usize::try_from(length).map_err(|_| CompactError::NonCanonical(length))?;
    let payload = reader.buf(length)?;
    Ok((offset + length, payload.to_vec()))
}
