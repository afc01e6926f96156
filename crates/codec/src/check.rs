//! Checks for the properties every conforming value must satisfy.
//!
//! These are what the contract tests run against each shape, and are public
//! so new shapes can be held to the same rules.

use thiserror::Error;

use crate::codec::{BareOpts, Codec, CodecInput};
use crate::error::CodecError;
use crate::registry::{create_type, RegistryRef};

/// A broken contract property.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("{type_name}: encoded_length {reported} != encoding length {actual}")]
    Length {
        type_name: String,
        reported: usize,
        actual: usize,
    },
    #[error("{type_name}: inspect does not flatten to the encoding")]
    Inspect { type_name: String },
    #[error("{type_name}: re-decoding failed: {source}")]
    Decode {
        type_name: String,
        #[source]
        source: CodecError,
    },
    #[error("{type_name}: re-decoding consumed {consumed:?} of {length} bytes")]
    Consumed {
        type_name: String,
        consumed: Option<usize>,
        length: usize,
    },
    #[error("{type_name}: re-decoded value differs")]
    Roundtrip { type_name: String },
    #[error("equal values hash differently")]
    Hash,
}

/// `encoded_length` equals the full encoding's length.
pub fn check_length(value: &dyn Codec) -> Result<(), InvariantViolation> {
    let reported = value.encoded_length();
    let actual = value.to_bytes(&BareOpts::No).len();
    if reported != actual {
        return Err(InvariantViolation::Length {
            type_name: value.to_raw_type(),
            reported,
            actual,
        });
    }
    Ok(())
}

/// `inspect(bare)` flattens to `to_bytes(bare)`.
pub fn check_inspect(value: &dyn Codec, bare: &BareOpts) -> Result<(), InvariantViolation> {
    if value.inspect(bare).flatten() != value.to_bytes(bare) {
        return Err(InvariantViolation::Inspect {
            type_name: value.to_raw_type(),
        });
    }
    Ok(())
}

/// Decoding the full encoding through the registry consumes all of it and
/// yields an equal value.
pub fn check_roundtrip(registry: &RegistryRef, value: &dyn Codec) -> Result<(), InvariantViolation> {
    let type_name = value.to_raw_type();
    let bytes = value.to_bytes(&BareOpts::No);
    let decoded = create_type(registry, &type_name, CodecInput::Bytes(&bytes)).map_err(|source| {
        InvariantViolation::Decode {
            type_name: type_name.clone(),
            source,
        }
    })?;
    if decoded.initial_u8a_length() != Some(bytes.len()) {
        return Err(InvariantViolation::Consumed {
            type_name,
            consumed: decoded.initial_u8a_length(),
            length: bytes.len(),
        });
    }
    if !decoded.eq_codec(value) {
        return Err(InvariantViolation::Roundtrip { type_name });
    }
    Ok(())
}

/// Equal values hash equally.
pub fn check_hash_eq(a: &dyn Codec, b: &dyn Codec) -> Result<(), InvariantViolation> {
    if a.eq_codec(b) && a.hash() != b.hash() {
        return Err(InvariantViolation::Hash);
    }
    Ok(())
}

/// Every check above, with `value` compared against its own re-decoding.
pub fn check_all(registry: &RegistryRef, value: &dyn Codec) -> Result<(), InvariantViolation> {
    check_length(value)?;
    check_inspect(value, &BareOpts::No)?;
    check_inspect(value, &BareOpts::Yes)?;
    check_roundtrip(registry, value)?;
    let copy = create_type(
        registry,
        &value.to_raw_type(),
        CodecInput::Bytes(&value.to_bytes(&BareOpts::No)),
    )
    .map_err(|source| InvariantViolation::Decode {
        type_name: value.to_raw_type(),
        source,
    })?;
    check_hash_eq(value, &*copy)
}
