//! Compact-encoded unsigned integers.

use std::any::Any;
use std::fmt;

use scale_types_util::{compact_from_u8a, compact_to_u8a};
use serde_json::Value;

use super::numeric;
use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// An unsigned integer bounded by a `BYTES`-wide type, written with the
/// variable-length compact prefix (`Compact<u32>` for `BYTES = 4`).
#[derive(Debug, Clone)]
pub struct Compact<const BYTES: usize> {
    registry: RegistryRef,
    value: u128,
    meta: CodecMeta,
}

impl<const BYTES: usize> Compact<BYTES> {
    pub const MAX: u128 = numeric::max_for(BYTES);

    pub fn new(registry: &RegistryRef, value: u128) -> Result<Self, ConstructionError> {
        if value > Self::MAX {
            return Err(ConstructionError::OutOfRange {
                type_name: Self::raw_type_of(&()),
                value: value.to_string(),
            });
        }
        Ok(Self {
            registry: registry.clone(),
            value,
            meta: CodecMeta::new(),
        })
    }

    pub fn value(&self) -> u128 {
        self.value
    }
}

impl<const BYTES: usize> PartialEq for Compact<BYTES> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<const BYTES: usize> fmt::Display for Compact<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const BYTES: usize> Codec for Compact<BYTES> {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, _bare: &BareOpts) -> Vec<u8> {
        compact_to_u8a(self.value)
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        Inspect::leaf(self.to_bytes(bare))
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, _is_extended: bool) -> Value {
        numeric::to_human(self.value)
    }

    fn to_json(&self) -> Value {
        numeric::to_json(self.value, BYTES)
    }

    fn to_primitive(&self) -> Value {
        numeric::to_primitive(self.value)
    }

    fn to_raw_type(&self) -> String {
        Self::raw_type_of(&())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }
}

impl<const BYTES: usize> CodecType for Compact<BYTES> {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), input: &[u8]) -> Result<Self, CodecError> {
        let (consumed, value) = compact_from_u8a(input)?;
        if value > Self::MAX {
            return Err(DecodeError::OutOfRange {
                type_name: Self::raw_type_of(&()),
                value,
            }
            .into());
        }
        Ok(Self {
            registry: registry.clone(),
            value,
            meta: CodecMeta::decoded(consumed),
        })
    }

    fn default_with(registry: &RegistryRef, _def: &()) -> Result<Self, CodecError> {
        Ok(Self::new(registry, 0)?)
    }

    fn from_primitive_with(
        registry: &RegistryRef,
        _def: &(),
        value: &Value,
    ) -> Result<Self, CodecError> {
        let parsed = numeric::parse(&Self::raw_type_of(&()), Self::MAX, value)?;
        Ok(Self::new(registry, parsed)?)
    }

    fn raw_type_of(_def: &()) -> String {
        format!("Compact<u{}>", BYTES * 8)
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
