//! Length-prefixed byte strings.

use std::any::Any;
use std::fmt;

use scale_types_buffers::Writer;
use scale_types_util::{compact_to_u8a, hex_to_u8a, is_hex, u8a_to_hex, write_compact};
use serde_json::Value;

use super::{decode_prefixed, ensure_length};
use crate::codec::{codec_eq, BareOpts, Codec, CodecType};
use crate::error::{CodecError, ConstructionError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// Largest payload [`Bytes`] will hold.
pub const MAX_BYTES_LENGTH: usize = 10 * 1024 * 1024;

/// A compact length prefix followed by raw bytes. Bare encoding drops the
/// prefix.
#[derive(Debug, Clone)]
pub struct Bytes {
    registry: RegistryRef,
    data: Vec<u8>,
    meta: CodecMeta,
}

impl Bytes {
    pub fn new(registry: &RegistryRef, data: Vec<u8>) -> Result<Self, ConstructionError> {
        ensure_length("Bytes", data.len(), MAX_BYTES_LENGTH)?;
        Ok(Self {
            registry: registry.clone(),
            data,
            meta: CodecMeta::new(),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        Codec::is_empty(self)
    }

    fn is_printable(&self) -> bool {
        !self.data.is_empty() && self.data.iter().all(|b| (0x20..=0x7e).contains(b))
    }
}

impl PartialEq for Bytes {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&u8a_to_hex(&self.data))
    }
}

impl Codec for Bytes {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        if bare.is_bare() {
            return self.data.clone();
        }
        let mut writer = Writer::with_capacity(self.data.len() + 5);
        write_compact(&mut writer, self.data.len() as u128);
        writer.buf(&self.data);
        writer.flush()
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        if bare.is_bare() {
            return Inspect::leaf(self.data.clone());
        }
        Inspect::new(
            vec![compact_to_u8a(self.data.len() as u128), self.data.clone()],
            Vec::new(),
        )
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    /// Printable ASCII renders as text, anything else as hex.
    fn to_human(&self, _is_extended: bool) -> Value {
        if self.is_printable() {
            Value::String(self.data.iter().map(|b| *b as char).collect())
        } else {
            self.to_json()
        }
    }

    fn to_json(&self) -> Value {
        Value::String(u8a_to_hex(&self.data))
    }

    fn to_primitive(&self) -> Value {
        self.to_json()
    }

    fn to_raw_type(&self) -> String {
        "Bytes".into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl CodecType for Bytes {
    type Def = ();

    fn decode_with(registry: &RegistryRef, _def: &(), input: &[u8]) -> Result<Self, CodecError> {
        let (payload, consumed) = decode_prefixed("Bytes", input, MAX_BYTES_LENGTH)?;
        Ok(Self {
            registry: registry.clone(),
            data: payload.to_vec(),
            meta: CodecMeta::decoded(consumed),
        })
    }

    fn default_with(registry: &RegistryRef, _def: &()) -> Result<Self, CodecError> {
        Ok(Self::new(registry, Vec::new())?)
    }

    /// Accepts `0x` hex, any other string as UTF-8, or an array of byte values.
    fn from_primitive_with(
        registry: &RegistryRef,
        _def: &(),
        value: &Value,
    ) -> Result<Self, CodecError> {
        let data = match value {
            Value::String(s) if is_hex(s) => {
                hex_to_u8a(s).map_err(ConstructionError::from)?
            }
            Value::String(s) => s.as_bytes().to_vec(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| ConstructionError::mismatch("Bytes", item))
                })
                .collect::<Result<Vec<u8>, _>>()?,
            other => return Err(ConstructionError::mismatch("Bytes", other).into()),
        };
        Ok(Self::new(registry, data)?)
    }

    fn raw_type_of(_def: &()) -> String {
        "Bytes".into()
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::registry::TypeRegistry;
    use serde_json::json;

    #[test]
    fn bare_drops_prefix() {
        let registry = TypeRegistry::new().into_ref();
        let value = Bytes::new(&registry, vec![0xaa, 0xbb]).unwrap();
        assert_eq!(value.to_bytes(&BareOpts::No), vec![0x08, 0xaa, 0xbb]);
        assert_eq!(value.to_bytes(&BareOpts::Yes), vec![0xaa, 0xbb]);
        assert_eq!(value.to_string(), "0xaabb");
        assert_eq!(value.to_hex(false), "0x08aabb");
    }

    #[test]
    fn human_prefers_text_when_printable() {
        let registry = TypeRegistry::new().into_ref();
        assert_eq!(
            Bytes::new(&registry, b"hi".to_vec())
                .unwrap()
                .to_human(false),
            json!("hi")
        );
        assert_eq!(
            Bytes::new(&registry, vec![0x00])
                .unwrap()
                .to_human(false),
            json!("0x00")
        );
    }

    #[test]
    fn decode_checks_declared_length() {
        let registry = TypeRegistry::new().into_ref();
        let err = Bytes::decode(&registry, &[0x0c, 0x01]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::UnexpectedEnd(_))));
    }

    #[test]
    fn from_primitive_shapes() {
        let registry = TypeRegistry::new().into_ref();
        let hex = Bytes::from_primitive_with(&registry, &(), &json!("0x0102")).unwrap();
        let text = Bytes::from_primitive_with(&registry, &(), &json!("ab")).unwrap();
        let list = Bytes::from_primitive_with(&registry, &(), &json!([1, 2])).unwrap();
        assert_eq!(hex.as_slice(), &[1, 2]);
        assert_eq!(text.as_slice(), b"ab");
        assert_eq!(list, hex);
        assert!(Bytes::from_primitive_with(&registry, &(), &json!([256])).is_err());
    }

    #[test]
    fn construction_is_bounded_like_decoding() {
        let registry = TypeRegistry::new().into_ref();
        let at_limit = Bytes::new(&registry, vec![0x5a; MAX_BYTES_LENGTH]).unwrap();
        assert_eq!(at_limit.len(), MAX_BYTES_LENGTH);
        let back = Bytes::decode(&registry, &at_limit.to_bytes(&BareOpts::No)).unwrap();
        assert_eq!(back, at_limit);

        let err = Bytes::new(&registry, vec![0x5a; MAX_BYTES_LENGTH + 1]).unwrap_err();
        assert!(matches!(err, ConstructionError::TooLong { max: MAX_BYTES_LENGTH, .. }));
        assert!(Bytes::new(&registry, Vec::new()).unwrap().is_empty());
    }
}
