//! The Codec contract for SCALE-style binary types.
//!
//! Every value that can cross the wire implements [`Codec`]: a canonical
//! byte encoding (full or bare), content equality and hashing, a layout
//! breakdown through [`Inspect`], and human, JSON and primitive
//! projections. Values are created through a [`Registry`], which maps type
//! names to constructors, so compound shapes resolve their children by name.
//!
//! ```
//! use scale_types_codec::{create_type, Codec, CodecInput, TypeRegistry};
//!
//! let registry = TypeRegistry::new().into_ref();
//! let value = create_type(&registry, "u16", CodecInput::Bytes(&[0x01, 0x00])).unwrap();
//! assert_eq!(value.to_hex(false), "0x0100");
//! assert_eq!(value.to_human(false), "1");
//! assert_eq!(value.initial_u8a_length(), Some(2));
//! ```
//!
//! - [`codec`] - the [`Codec`] and [`CodecType`] traits
//! - [`types`] - reference shapes
//! - [`registry`] - name resolution and dynamic construction
//! - [`storage`] - decoding storage reads with default fallback
//! - [`check`] - contract property checks

pub mod check;
pub mod codec;
pub mod compat;
pub mod error;
pub mod hash;
pub mod inspect;
pub mod meta;
pub mod registry;
pub mod storage;
pub mod types;

pub use check::{
    check_all, check_hash_eq, check_inspect, check_length, check_roundtrip, InvariantViolation,
};
pub use codec::{codec_eq, BareOpts, Codec, CodecInput, CodecType};
pub use compat::CodecDeprecated;
pub use error::{CodecError, ConstructionError, DecodeError, MetaError};
pub use hash::CodecHash;
pub use inspect::Inspect;
pub use meta::CodecMeta;
pub use registry::{
    constructor_for, create_type, decode_type, Constructor, Registry, RegistryRef, TypeRegistry,
    MAX_DEPTH,
};
pub use storage::{decode_storage, decode_storage_type, decode_storage_type_or, decode_storage_with};
pub use types::{
    Bool, Bytes, Compact, Enum, EnumDef, Null, OptionCodec, OptionDef, Struct, StructDef, Text,
    UInt, VecCodec, VecDef, MAX_BYTES_LENGTH, MAX_ENUM_VARIANTS, MAX_TEXT_LENGTH, MAX_VEC_LENGTH,
    U128, U16, U32, U64, U8,
};
