//! Content hash of encoded values.

use std::fmt;

use scale_types_util::u8a_to_hex;

/// A 32-byte BLAKE3 digest of a value's full encoding.
///
/// The algorithm is fixed for the whole process so that equal values hash
/// identically no matter which shape produced them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodecHash([u8; 32]);

impl CodecHash {
    /// Hashes raw bytes.
    #[must_use]
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        u8a_to_hex(&self.0)
    }
}

impl fmt::Display for CodecHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for CodecHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodecHash({})", self.to_hex())
    }
}
