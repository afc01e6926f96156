//! Fixed-width little-endian unsigned integers.

use std::any::Any;
use std::fmt;

use scale_types_buffers::Reader;
use serde_json::Value;

use super::numeric;
use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// An unsigned integer encoded in exactly `BYTES` little-endian bytes.
///
/// `BYTES` is one of 1, 2, 4, 8 or 16.
#[derive(Debug, Clone)]
pub struct UInt<const BYTES: usize> {
    registry: RegistryRef,
    value: u128,
    meta: CodecMeta,
}

pub type U8 = UInt<1>;
pub type U16 = UInt<2>;
pub type U32 = UInt<4>;
pub type U64 = UInt<8>;
pub type U128 = UInt<16>;

impl<const BYTES: usize> UInt<BYTES> {
    const WIDTH_OK: () = assert!(matches!(BYTES, 1 | 2 | 4 | 8 | 16));

    pub const MAX: u128 = numeric::max_for(BYTES);

    pub fn new(registry: &RegistryRef, value: u128) -> Result<Self, ConstructionError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
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

impl<const BYTES: usize> PartialEq for UInt<BYTES> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<const BYTES: usize> fmt::Display for UInt<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const BYTES: usize> Codec for UInt<BYTES> {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, _bare: &BareOpts) -> Vec<u8> {
        self.value.to_le_bytes()[..BYTES].to_vec()
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

    fn encoded_length(&self) -> usize {
        BYTES
    }

    fn is_empty(&self) -> bool {
        self.value == 0
    }
}

impl<const BYTES: usize> CodecType for UInt<BYTES> {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), input: &[u8]) -> Result<Self, CodecError> {
        let bytes = Reader::new(input).buf(BYTES)?;
        let mut le = [0u8; 16];
        le[..BYTES].copy_from_slice(bytes);
        let mut value = Self::new(registry, u128::from_le_bytes(le))?;
        value.meta = CodecMeta::decoded(BYTES);
        Ok(value)
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
        format!("u{}", BYTES * 8)
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
