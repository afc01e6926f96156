//! Single-byte boolean.

use std::any::Any;
use std::fmt;

use scale_types_buffers::Reader;
use serde_json::Value;

use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// `0x00` is false, `0x01` is true; any other byte fails to decode.
#[derive(Debug, Clone)]
pub struct Bool {
    registry: RegistryRef,
    value: bool,
    meta: CodecMeta,
}

impl Bool {
    pub fn new(registry: &RegistryRef, value: bool) -> Self {
        Self {
            registry: registry.clone(),
            value,
            meta: CodecMeta::new(),
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl PartialEq for Bool {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Codec for Bool {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, _bare: &BareOpts) -> Vec<u8> {
        vec![u8::from(self.value)]
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        Inspect::leaf(self.to_bytes(bare))
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, _is_extended: bool) -> Value {
        Value::Bool(self.value)
    }

    fn to_json(&self) -> Value {
        Value::Bool(self.value)
    }

    fn to_primitive(&self) -> Value {
        Value::Bool(self.value)
    }

    fn to_raw_type(&self) -> String {
        "bool".into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn encoded_length(&self) -> usize {
        1
    }

    fn is_empty(&self) -> bool {
        !self.value
    }
}

impl CodecType for Bool {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), input: &[u8]) -> Result<Self, CodecError> {
        let value = match Reader::new(input).u8()? {
            0 => false,
            1 => true,
            other => return Err(DecodeError::InvalidBool(other).into()),
        };
        Ok(Self {
            registry: registry.clone(),
            value,
            meta: CodecMeta::decoded(1),
        })
    }

    fn default_with(registry: &RegistryRef, _def: &()) -> Result<Self, CodecError> {
        Ok(Self::new(registry, false))
    }

    fn from_primitive_with(
        registry: &RegistryRef,
        _def: &(),
        value: &Value,
    ) -> Result<Self, CodecError> {
        match value {
            Value::Bool(b) => Ok(Self::new(registry, *b)),
            other => Err(ConstructionError::mismatch("bool", other).into()),
        }
    }

    fn raw_type_of(_def: &()) -> String {
        "bool".into()
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
