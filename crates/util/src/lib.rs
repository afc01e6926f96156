//! Utility functions for scale-types.
//!
//! - [`hex`] - `0x`-prefixed hex conversion
//! - [`compact`] - SCALE compact (variable-length) integer prefixes
//! - [`u8a`] - byte-array concatenation and comparison
//! - [`format`] - human-readable number formatting

pub mod compact;
pub mod format;
pub mod hex;
pub mod u8a;

pub use compact::{
    compact_add_length, compact_from_u8a, compact_strip_length, compact_to_u8a, write_compact,
    CompactError, MAX_COMPACT_BYTES,
};
pub use format::format_number;
pub use hex::{hex_to_u8a, is_hex, u8a_to_hex, HexError};
pub use u8a::{u8a_concat, u8a_eq};
