//! Length-prefixed UTF-8 strings.

use std::any::Any;
use std::fmt;

use scale_types_util::compact_to_u8a;
use serde_json::Value;

use super::{decode_prefixed, ensure_length};
use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// Largest string [`Text`] will hold, in UTF-8 bytes.
pub const MAX_TEXT_LENGTH: usize = 128 * 1024;

#[derive(Debug, Clone)]
pub struct Text {
    registry: RegistryRef,
    value: String,
    meta: CodecMeta,
}

impl Text {
    pub fn new(
        registry: &RegistryRef,
        value: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        let value = value.into();
        ensure_length("Text", value.len(), MAX_TEXT_LENGTH)?;
        Ok(Self {
            registry: registry.clone(),
            value,
            meta: CodecMeta::new(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Codec for Text {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        let utf8 = self.value.as_bytes();
        if bare.is_bare() {
            return utf8.to_vec();
        }
        let mut out = compact_to_u8a(utf8.len() as u128);
        out.extend_from_slice(utf8);
        out
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        let utf8 = self.value.as_bytes().to_vec();
        if bare.is_bare() {
            return Inspect::leaf(utf8);
        }
        Inspect::new(vec![compact_to_u8a(utf8.len() as u128), utf8], Vec::new())
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, _is_extended: bool) -> Value {
        Value::String(self.value.clone())
    }

    fn to_json(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn to_primitive(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn to_raw_type(&self) -> String {
        "Text".into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl CodecType for Text {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), input: &[u8]) -> Result<Self, CodecError> {
        let (payload, consumed) = decode_prefixed("Text", input, MAX_TEXT_LENGTH)?;
        let value = std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8)?;
        Ok(Self {
            registry: registry.clone(),
            value: value.to_owned(),
            meta: CodecMeta::decoded(consumed),
        })
    }

    fn default_with(registry: &RegistryRef, _def: &()) -> Result<Self, CodecError> {
        Ok(Self::new(registry, String::new())?)
    }

    fn from_primitive_with(
        registry: &RegistryRef,
        _def: &(),
        value: &Value,
    ) -> Result<Self, CodecError> {
        match value {
            Value::String(s) => Ok(Self::new(registry, s.as_str())?),
            other => Err(ConstructionError::mismatch("Text", other).into()),
        }
    }

    fn raw_type_of(_def: &()) -> String {
        "Text".into()
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;

    #[test]
    fn utf8_roundtrip_with_prefix() {
        let registry = TypeRegistry::new().into_ref();
        let value = Text::new(&registry, "héllo").unwrap();
        let bytes = value.to_bytes(&BareOpts::No);
        assert_eq!(bytes[0], 6 << 2);
        let back = Text::decode(&registry, &bytes).unwrap();
        assert_eq!(back.as_str(), "héllo");
        assert_eq!(back.initial_u8a_length(), Some(7));
        assert_eq!(back.to_string(), "héllo");
    }

    #[test]
    fn invalid_utf8_fails() {
        let registry = TypeRegistry::new().into_ref();
        let err = Text::decode(&registry, &[0x04, 0xff]).unwrap_err();
        assert_eq!(err, CodecError::Decode(DecodeError::InvalidUtf8));
    }

    #[test]
    fn oversized_prefix_is_rejected_before_reading() {
        let registry = TypeRegistry::new().into_ref();
        // declares 2^30 bytes
        let err = Text::decode(&registry, &[0x03, 0x00, 0x00, 0x00, 0x40]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::LengthTooLarge { .. })
        ));
    }

    #[test]
    fn construction_is_bounded_like_decoding() {
        let registry = TypeRegistry::new().into_ref();
        let at_limit = Text::new(&registry, "a".repeat(MAX_TEXT_LENGTH)).unwrap();
        let bytes = at_limit.to_bytes(&BareOpts::No);
        assert_eq!(Text::decode(&registry, &bytes).unwrap(), at_limit);

        // length counts UTF-8 bytes, not chars
        let err = Text::new(&registry, "é".repeat(MAX_TEXT_LENGTH / 2 + 1)).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::TooLong {
                type_name: "Text".into(),
                length: MAX_TEXT_LENGTH + 2,
                max: MAX_TEXT_LENGTH,
            }
        );
    }
}
