//! Tagged unions.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use scale_types_buffers::Reader;
use serde_json::{Map, Value};

use crate::codec::{codec_eq, BareOpts, Codec, CodecInput, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::{create_type, decode_type, RegistryRef};

/// Discriminants are a single byte.
pub const MAX_ENUM_VARIANTS: usize = 256;

/// Name and ordered `(variant, payload type)` list of an enum. A variant's
/// discriminant is its position, so at most [`MAX_ENUM_VARIANTS`] are
/// addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    variants: Vec<(String, String)>,
}

impl EnumDef {
    pub fn new(name: &str, variants: &[(&str, &str)]) -> Result<Self, ConstructionError> {
        if variants.len() > MAX_ENUM_VARIANTS {
            return Err(ConstructionError::TooManyVariants {
                type_name: name.to_owned(),
                count: variants.len(),
                max: MAX_ENUM_VARIANTS,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            variants: variants
                .iter()
                .map(|(variant, ty)| ((*variant).to_owned(), ty.trim().to_owned()))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_str())
    }

    fn position(&self, variant: &str) -> Option<u8> {
        let index = self.variants.iter().position(|(name, _)| name == variant)?;
        u8::try_from(index).ok()
    }

    fn unknown(&self, variant: impl Into<String>) -> ConstructionError {
        ConstructionError::UnknownVariant {
            type_name: self.name.clone(),
            variant: variant.into(),
        }
    }
}

/// One discriminant byte followed by the selected variant's payload.
/// Variants without data carry a [`Null`](super::Null) payload.
#[derive(Debug, Clone)]
pub struct Enum {
    registry: RegistryRef,
    def: Arc<EnumDef>,
    index: u8,
    value: Box<dyn Codec>,
    meta: CodecMeta,
}

impl Enum {
    pub fn new(
        registry: &RegistryRef,
        def: Arc<EnumDef>,
        variant: &str,
        value: Box<dyn Codec>,
    ) -> Result<Self, ConstructionError> {
        let index = def.position(variant).ok_or_else(|| def.unknown(variant))?;
        let expected = &def.variants[index as usize].1;
        let found = value.to_raw_type();
        if &found != expected {
            return Err(ConstructionError::Mismatch {
                expected: expected.clone(),
                found,
            });
        }
        Ok(Self {
            registry: registry.clone(),
            def,
            index,
            value,
            meta: CodecMeta::new(),
        })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn variant(&self) -> &str {
        &self.def.variants[self.index as usize].0
    }

    pub fn is_variant(&self, variant: &str) -> bool {
        self.variant() == variant
    }

    pub fn value(&self) -> &dyn Codec {
        &*self.value
    }

    /// The payload, if `variant` is the selected one.
    pub fn as_variant(&self, variant: &str) -> Option<&dyn Codec> {
        self.is_variant(variant).then(|| self.value())
    }

    fn is_basic(&self) -> bool {
        self.value.to_raw_type() == "Null"
    }

    fn project(&self, f: impl Fn(&dyn Codec) -> Value) -> Value {
        let name = self.variant().to_owned();
        if self.is_basic() {
            return Value::String(name);
        }
        let mut map = Map::new();
        map.insert(name, f(self.value()));
        Value::Object(map)
    }

    fn with_payload(
        registry: &RegistryRef,
        def: &Arc<EnumDef>,
        index: u8,
        input: CodecInput<'_>,
    ) -> Result<Self, CodecError> {
        let ty = &def.variants[index as usize].1;
        let value = create_type(registry, ty, input)?;
        Ok(Self {
            registry: registry.clone(),
            def: def.clone(),
            index,
            value,
            meta: CodecMeta::new(),
        })
    }
}

impl PartialEq for Enum {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def && self.index == other.index && *self.value == *other.value
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_basic() {
            f.write_str(self.variant())
        } else {
            write!(f, "{}", self.to_json())
        }
    }
}

impl Codec for Enum {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        let payload = self.value.to_bytes(bare.item());
        if bare.is_bare() {
            return payload;
        }
        let mut out = Vec::with_capacity(1 + payload.len());
        out.push(self.index);
        out.extend(payload);
        out
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        let outer = if bare.is_bare() {
            Vec::new()
        } else {
            vec![vec![self.index]]
        };
        let payload = self.value.inspect(bare.item()).named(self.variant());
        Inspect::new(outer, vec![payload])
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
        self.def.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_codec(&self) -> Box<dyn Codec> {
        Box::new(self.clone())
    }
}

impl CodecType for Enum {
    type Def = Arc<EnumDef>;

    fn decode_with(
        registry: &RegistryRef,
        def: &Arc<EnumDef>,
        input: &[u8],
    ) -> Result<Self, CodecError> {
        let mut reader = Reader::new(input);
        let index = reader.u8()?;
        let Some((_, ty)) = def.variants.get(index as usize) else {
            return Err(DecodeError::InvalidDiscriminant {
                type_name: def.name.clone(),
                index,
            }
            .into());
        };
        let (value, consumed) = decode_type(registry, ty, reader.rest())?;
        reader.skip(consumed)?;
        Ok(Self {
            registry: registry.clone(),
            def: def.clone(),
            index,
            value,
            meta: CodecMeta::decoded(reader.position()),
        })
    }

    /// The first variant with its payload's default.
    fn default_with(registry: &RegistryRef, def: &Arc<EnumDef>) -> Result<Self, CodecError> {
        if def.variants.is_empty() {
            return Err(ConstructionError::EmptyEnum(def.name.clone()).into());
        }
        Self::with_payload(registry, def, 0, CodecInput::Default)
    }

    /// Accepts a variant name (default payload), a discriminant number
    /// (default payload), or a single-key object `{variant: payload}`.
    fn from_primitive_with(
        registry: &RegistryRef,
        def: &Arc<EnumDef>,
        value: &Value,
    ) -> Result<Self, CodecError> {
        match value {
            Value::String(variant) => {
                let index = def.position(variant).ok_or_else(|| def.unknown(variant))?;
                Self::with_payload(registry, def, index, CodecInput::Default)
            }
            Value::Number(number) => {
                let index = number
                    .as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .filter(|n| (*n as usize) < def.variants.len())
                    .ok_or_else(|| def.unknown(number.to_string()))?;
                Self::with_payload(registry, def, index, CodecInput::Default)
            }
            Value::Object(map) if map.len() == 1 => {
                let Some((variant, payload)) = map.iter().next() else {
                    return Err(ConstructionError::mismatch(def.name.as_str(), value).into());
                };
                let index = def.position(variant).ok_or_else(|| def.unknown(variant))?;
                Self::with_payload(registry, def, index, CodecInput::Primitive(payload))
            }
            other => Err(ConstructionError::mismatch(def.name.as_str(), other).into()),
        }
    }

    fn raw_type_of(def: &Arc<EnumDef>) -> String {
        def.name.clone()
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

    fn def() -> Arc<EnumDef> {
        Arc::new(EnumDef::new(
            "Action",
            &[("Stop", "Null"), ("Move", "u16"), ("Say", "Text")],
        )
        .unwrap())
    }

    #[test]
    fn basic_variant_projects_as_name() {
        let registry = TypeRegistry::new().into_ref();
        let value = Enum::decode_with(&registry, &def(), &[0x00, 0xff]).unwrap();
        assert_eq!(value.initial_u8a_length(), Some(1));
        assert!(value.is_variant("Stop"));
        assert_eq!(value.to_json(), json!("Stop"));
        assert_eq!(value.to_string(), "Stop");
        assert!(value.is_empty());
    }

    #[test]
    fn payload_variant_projects_as_object() {
        let registry = TypeRegistry::new().into_ref();
        let value = Enum::decode_with(&registry, &def(), &[0x01, 0x01, 0x00]).unwrap();
        assert_eq!(value.index(), 1);
        assert_eq!(value.to_json(), json!({"Move": 1}));
        assert_eq!(value.to_bytes(&BareOpts::Yes), vec![0x01, 0x00]);
        assert_eq!(value.as_variant("Move").map(|v| v.to_json()), Some(json!(1)));
        assert!(value.as_variant("Say").is_none());
    }

    #[test]
    fn unknown_discriminant() {
        let registry = TypeRegistry::new().into_ref();
        let err = Enum::decode_with(&registry, &def(), &[0x03]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Decode(DecodeError::InvalidDiscriminant {
                type_name: "Action".into(),
                index: 3
            })
        );
    }

    #[test]
    fn from_primitive_forms() {
        let registry = TypeRegistry::new().into_ref();
        let by_name = Enum::from_primitive_with(&registry, &def(), &json!("Say")).unwrap();
        assert_eq!(by_name.to_bytes(&BareOpts::No), vec![0x02, 0x00]);
        let by_object =
            Enum::from_primitive_with(&registry, &def(), &json!({"Say": "hey"})).unwrap();
        assert_eq!(by_object.to_json(), json!({"Say": "hey"}));
        let by_index = Enum::from_primitive_with(&registry, &def(), &json!(1)).unwrap();
        assert!(by_index.is_variant("Move"));
        assert!(Enum::from_primitive_with(&registry, &def(), &json!("Fly")).is_err());
        assert!(Enum::from_primitive_with(&registry, &def(), &json!(9)).is_err());
    }

    #[test]
    fn empty_enum_has_no_default() {
        let registry = TypeRegistry::new().into_ref();
        let def = Arc::new(EnumDef::new("Never", &[]).unwrap());
        assert_eq!(
            Enum::default_with(&registry, &def).unwrap_err(),
            CodecError::Construction(ConstructionError::EmptyEnum("Never".into()))
        );
    }

    fn numbered(count: usize) -> Vec<(String, String)> {
        (0..count)
            .map(|i| (format!("V{i}"), "Null".to_owned()))
            .collect()
    }

    fn borrowed(variants: &[(String, String)]) -> Vec<(&str, &str)> {
        variants
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
            .collect()
    }

    #[test]
    fn full_discriminant_range_is_addressable() {
        let registry = TypeRegistry::new().into_ref();
        let variants = numbered(MAX_ENUM_VARIANTS);
        let def = Arc::new(EnumDef::new("Wide", &borrowed(&variants)).unwrap());
        let last = Enum::from_primitive_with(&registry, &def, &json!("V255")).unwrap();
        assert_eq!(last.index(), 255);
        assert_eq!(last.to_bytes(&BareOpts::No), vec![0xff]);
        let decoded = Enum::decode_with(&registry, &def, &[0xff]).unwrap();
        assert!(decoded.is_variant("V255"));
    }

    #[test]
    fn unaddressable_variants_are_rejected() {
        let variants = numbered(MAX_ENUM_VARIANTS + 1);
        assert_eq!(
            EnumDef::new("Wider", &borrowed(&variants)).unwrap_err(),
            ConstructionError::TooManyVariants {
                type_name: "Wider".into(),
                count: 257,
                max: MAX_ENUM_VARIANTS,
            }
        );
    }
}
