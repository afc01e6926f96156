//! `0x`-prefixed hex conversion.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HexError {
    #[error("invalid hex string: {0}")]
    Invalid(#[from] ::hex::FromHexError),
}

/// Encodes bytes as a lowercase, `0x`-prefixed hex string.
///
/// ```
/// use scale_types_util::u8a_to_hex;
///
/// assert_eq!(u8a_to_hex(&[0x01, 0x00]), "0x0100");
/// assert_eq!(u8a_to_hex(&[]), "0x");
/// ```
pub fn u8a_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&::hex::encode(bytes));
    out
}

/// Decodes a hex string, with or without the `0x` prefix.
pub fn hex_to_u8a(value: &str) -> Result<Vec<u8>, HexError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    Ok(::hex::decode(digits)?)
}

/// True for a `0x`-prefixed string holding an even number of hex digits.
pub fn is_hex(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
