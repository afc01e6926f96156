//! The empty value.

use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// Encodes to nothing; the payload of unit enum variants.
#[derive(Debug, Clone)]
pub struct Null {
    registry: RegistryRef,
    meta: CodecMeta,
}

impl Null {
    pub fn new(registry: &RegistryRef) -> Self {
        Self {
            registry: registry.clone(),
            meta: CodecMeta::new(),
        }
    }
}

impl PartialEq for Null {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Display for Null {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Codec for Null {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, _bare: &BareOpts) -> Vec<u8> {
        Vec::new()
    }

    fn inspect(&self, _bare: &BareOpts) -> Inspect {
        Inspect::default()
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, _is_extended: bool) -> Value {
        Value::Null
    }

    fn to_json(&self) -> Value {
        Value::Null
    }

    fn to_primitive(&self) -> Value {
        Value::Null
    }

    fn to_raw_type(&self) -> String {
        "Null".into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn encoded_length(&self) -> usize {
        0
    }
}

impl CodecType for Null {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), _input: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            registry: registry.clone(),
            meta: CodecMeta::decoded(0),
        })
    }

    fn default_with(registry: &RegistryRef, _def: &()) -> Result<Self, CodecError> {
        Ok(Self::new(registry))
    }

    fn from_primitive_with(
        registry: &RegistryRef,
        _def: &(),
        value: &Value,
    ) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(Self::new(registry)),
            other => Err(ConstructionError::mismatch("Null", other).into()),
        }
    }

    fn raw_type_of(_def: &()) -> String {
        "Null".into()
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
