//! Optional values.

use std::any::Any;
use std::fmt;

use scale_types_buffers::Reader;
use serde_json::Value;

use crate::codec::{codec_eq, BareOpts, Codec, CodecInput, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::{create_type, decode_type, RegistryRef};

/// Payload type of an `Option<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    inner: String,
}

impl OptionDef {
    pub fn new(inner: impl Into<String>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    pub fn inner(&self) -> &str {
        &self.inner
    }
}

/// `Option<T>`: `0x00` for none, `0x01` followed by the payload for some.
#[derive(Debug, Clone)]
pub struct OptionCodec {
    registry: RegistryRef,
    def: OptionDef,
    value: Option<Box<dyn Codec>>,
    meta: CodecMeta,
}

impl OptionCodec {
    pub fn none(registry: &RegistryRef, def: OptionDef) -> Self {
        Self {
            registry: registry.clone(),
            def,
            value: None,
            meta: CodecMeta::new(),
        }
    }

    pub fn some(
        registry: &RegistryRef,
        def: OptionDef,
        value: Box<dyn Codec>,
    ) -> Result<Self, ConstructionError> {
        let found = value.to_raw_type();
        if found != def.inner {
            return Err(ConstructionError::Mismatch {
                expected: def.inner,
                found,
            });
        }
        Ok(Self {
            value: Some(value),
            ..Self::none(registry, def)
        })
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&dyn Codec> {
        self.value.as_deref()
    }

    fn project(&self, f: impl Fn(&dyn Codec) -> Value) -> Value {
        self.value().map_or(Value::Null, f)
    }
}

impl PartialEq for OptionCodec {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def && self.value == other.value
    }
}

impl fmt::Display for OptionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => fmt::Display::fmt(value, f),
            None => Ok(()),
        }
    }
}

impl Codec for OptionCodec {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    /// Bare encoding drops the flag byte, so none becomes empty.
    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        match (&self.value, bare.is_bare()) {
            (None, true) => Vec::new(),
            (None, false) => vec![0x00],
            (Some(value), true) => value.to_bytes(bare.item()),
            (Some(value), false) => {
                let mut out = vec![0x01];
                out.extend(value.to_bytes(bare.item()));
                out
            }
        }
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        let outer = match (&self.value, bare.is_bare()) {
            (_, true) => Vec::new(),
            (None, false) => vec![vec![0x00]],
            (Some(_), false) => vec![vec![0x01]],
        };
        let inner = self
            .value
            .iter()
            .map(|value| value.inspect(bare.item()))
            .collect();
        Inspect::new(outer, inner)
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, is_extended: bool) -> Value {
        self.project(|value| value.to_human(is_extended))
    }

    fn to_json(&self) -> Value {
        self.project(|value| value.to_json())
    }

    fn to_primitive(&self) -> Value {
        self.project(|value| value.to_primitive())
    }

    fn to_raw_type(&self) -> String {
        Self::raw_type_of(&self.def)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

impl CodecType for OptionCodec {
    type Def = OptionDef;

    fn decode_with(
        registry: &RegistryRef,
        def: &OptionDef,
        input: &[u8],
    ) -> Result<Self, CodecError> {
        let mut reader = Reader::new(input);
        let mut value = match reader.u8()? {
            0x00 => Self::none(registry, def.clone()),
            0x01 => {
                let (inner, consumed) = decode_type(registry, &def.inner, reader.rest())?;
                reader.skip(consumed)?;
                Self {
                    value: Some(inner),
                    ..Self::none(registry, def.clone())
                }
            }
            index => {
                return Err(DecodeError::InvalidDiscriminant {
                    type_name: Self::raw_type_of(def),
                    index,
                }
                .into())
            }
        };
        value.meta = CodecMeta::decoded(reader.position());
        Ok(value)
    }

    fn default_with(registry: &RegistryRef, def: &OptionDef) -> Result<Self, CodecError> {
        Ok(Self::none(registry, def.clone()))
    }

    /// `null` is none; anything else must be a primitive of the payload type.
    fn from_primitive_with(
        registry: &RegistryRef,
        def: &OptionDef,
        value: &Value,
    ) -> Result<Self, CodecError> {
        if value.is_null() {
            return Ok(Self::none(registry, def.clone()));
        }
        let inner = create_type(registry, &def.inner, CodecInput::Primitive(value))?;
        Ok(Self {
            value: Some(inner),
            ..Self::none(registry, def.clone())
        })
    }

    fn raw_type_of(def: &OptionDef) -> String {
        format!("Option<{}>", def.inner)
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use serde_json::json;

    fn def() -> OptionDef {
        OptionDef::new("u32")
    }

    #[test]
    fn none_and_some_layouts() {
        let registry = TypeRegistry::new().into_ref();
        let none = OptionCodec::decode_with(&registry, &def(), &[0x00, 0xaa]).unwrap();
        assert!(none.is_none());
        assert_eq!(none.initial_u8a_length(), Some(1));
        assert_eq!(none.to_json(), Value::Null);
        assert_eq!(none.to_string(), "");
        assert!(none.to_bytes(&BareOpts::Yes).is_empty());

        let some = OptionCodec::decode_with(&registry, &def(), &[0x01, 5, 0, 0, 0]).unwrap();
        assert_eq!(some.initial_u8a_length(), Some(5));
        assert_eq!(some.to_json(), json!(5));
        assert_eq!(some.to_string(), "5");
        assert_eq!(some.to_bytes(&BareOpts::Yes), vec![5, 0, 0, 0]);
        assert_eq!(some.inspect(&BareOpts::No).flatten(), vec![0x01, 5, 0, 0, 0]);
    }

    #[test]
    fn bad_flag_is_rejected() {
        let registry = TypeRegistry::new().into_ref();
        let err = OptionCodec::decode_with(&registry, &def(), &[0x02]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Decode(DecodeError::InvalidDiscriminant {
                type_name: "Option<u32>".into(),
                index: 2
            })
        );
    }

    #[test]
    fn some_checks_payload_type() {
        let registry = TypeRegistry::new().into_ref();
        let text = create_type(&registry, "Text", CodecInput::Default).unwrap();
        assert!(OptionCodec::some(&registry, def(), text).is_err());
        let from_null =
            OptionCodec::from_primitive_with(&registry, &def(), &Value::Null).unwrap();
        assert!(from_null.is_empty());
    }
}
