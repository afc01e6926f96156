//! Binary buffer utilities for scale-types.
//!
//! Every multi-byte integer in the wire format is little-endian, so both the
//! reader and the writer here are little-endian only.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//! - [`print_octets`] - Hex preview of a byte slice for debug output
//!
//! # Example
//!
//! ```
//! use scale_types_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! let data = writer.flush();
//! assert_eq!(data, vec![0x01, 0x03, 0x02]);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.size(), 0);
//! ```

mod print_octets;
mod reader;
mod writer;

pub use print_octets::{print_octets, print_octets_default};
pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: needed {needed} byte(s), {available} available")]
    EndOfBuffer { needed: usize, available: usize },
}
