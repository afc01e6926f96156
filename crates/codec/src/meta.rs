//! Per-value metadata that is not part of the decoded content.

use std::sync::OnceLock;

use crate::error::MetaError;
use crate::hash::CodecHash;

/// Metadata carried by every conforming value.
///
/// `initial_u8a_length` is fixed at construction. The two remaining fields
/// are write-once cells filled by the storage retrieval layer before the
/// value is shared; none of them take part in equality or hashing.
#[derive(Debug, Clone, Default)]
pub struct CodecMeta {
    initial_u8a_length: Option<usize>,
    created_at_hash: OnceLock<CodecHash>,
    is_storage_fallback: OnceLock<bool>,
}

impl CodecMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a value decoded from `consumed` input bytes.
    pub fn decoded(consumed: usize) -> Self {
        Self {
            initial_u8a_length: Some(consumed),
            ..Self::default()
        }
    }

    pub fn initial_u8a_length(&self) -> Option<usize> {
        self.initial_u8a_length
    }

    /// Forgets the consumed length, for values re-derived from another value.
    pub fn clear_initial_u8a_length(&mut self) {
        self.initial_u8a_length = None;
    }

    pub fn created_at_hash(&self) -> Option<CodecHash> {
        self.created_at_hash.get().copied()
    }

    pub fn set_created_at_hash(&self, hash: CodecHash) -> Result<(), MetaError> {
        self.created_at_hash
            .set(hash)
            .map_err(|_| MetaError::AlreadySet("created_at_hash"))
    }

    pub fn is_storage_fallback(&self) -> Option<bool> {
        self.is_storage_fallback.get().copied()
    }

    pub fn set_is_storage_fallback(&self, fallback: bool) -> Result<(), MetaError> {
        self.is_storage_fallback
            .set(fallback)
            .map_err(|_| MetaError::AlreadySet("is_storage_fallback"))
    }
}
