//! Error types for construction and decoding.

use scale_types_buffers::BufferError;
use scale_types_util::{CompactError, HexError};
use thiserror::Error;

/// Failure while decoding a value from bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input too short: {0}")]
    UnexpectedEnd(#[from] BufferError),
    #[error("malformed length prefix: {0}")]
    Compact(#[from] CompactError),
    #[error("invalid discriminant {index} for {type_name}")]
    InvalidDiscriminant { type_name: String, index: u8 },
    #[error("invalid bool byte 0x{0:02x}")]
    InvalidBool(u8),
    #[error("invalid UTF-8 in Text")]
    InvalidUtf8,
    #[error("{type_name} length {length} exceeds maximum {max}")]
    LengthTooLarge {
        type_name: String,
        length: u128,
        max: usize,
    },
    #[error("value {value} out of range for {type_name}")]
    OutOfRange { type_name: String, value: u128 },
    #[error("{type_name} nested deeper than {max} levels")]
    TooDeep { type_name: String, max: usize },
}

/// Failure while constructing a value from a non-byte argument.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("cannot construct {expected} from {found}")]
    Mismatch { expected: String, found: String },
    #[error("value {value} out of range for {type_name}")]
    OutOfRange { type_name: String, value: String },
    #[error("unknown variant `{variant}` for {type_name}")]
    UnknownVariant { type_name: String, variant: String },
    #[error("{0} has no variants")]
    EmptyEnum(String),
    #[error("{type_name} declares {count} variants, at most {max} are addressable")]
    TooManyVariants {
        type_name: String,
        count: usize,
        max: usize,
    },
    #[error("{type_name} length {length} exceeds maximum {max}")]
    TooLong {
        type_name: String,
        length: usize,
        max: usize,
    },
    #[error("{type_name} nested deeper than {max} levels")]
    TooDeep { type_name: String, max: usize },
    #[error(transparent)]
    Hex(#[from] HexError),
}

/// Write-once metadata was written twice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("{0} already set")]
    AlreadySet(&'static str),
}

/// Any failure surfaced by a constructor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Meta(#[from] MetaError),
}

impl From<BufferError> for CodecError {
    fn from(err: BufferError) -> Self {
        CodecError::Decode(err.into())
    }
}

impl From<CompactError> for CodecError {
    fn from(err: CompactError) -> Self {
        CodecError::Decode(err.into())
    }
}

impl ConstructionError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: &serde_json::Value) -> Self {
        ConstructionError::Mismatch {
            expected: expected.into(),
            found: json_kind(found).to_owned(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
