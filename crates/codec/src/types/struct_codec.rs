//! Named-field records.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::codec::{codec_eq, BareOpts, Codec, CodecInput, CodecType};
use crate::error::{CodecError, ConstructionError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::{create_type, decode_type, RegistryRef};

/// Name and ordered `(field, type)` list of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    name: String,
    fields: Vec<(String, String)>,
}

impl StructDef {
    pub fn new(name: &str, fields: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_owned(),
            fields: fields
                .iter()
                .map(|(field, ty)| ((*field).to_owned(), ty.trim().to_owned()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }
}

/// Fields encoded back to back in declaration order, with no framing of
/// its own.
#[derive(Debug, Clone)]
pub struct Struct {
    registry: RegistryRef,
    def: Arc<StructDef>,
    values: Vec<Box<dyn Codec>>,
    meta: CodecMeta,
}

impl Struct {
    /// Builds a struct from one value per field, in declaration order.
    pub fn new(
        registry: &RegistryRef,
        def: Arc<StructDef>,
        values: Vec<Box<dyn Codec>>,
    ) -> Result<Self, ConstructionError> {
        if values.len() != def.fields.len() {
            return Err(ConstructionError::Mismatch {
                expected: format!("{} fields", def.fields.len()),
                found: format!("{} values", values.len()),
            });
        }
        for ((_, ty), value) in def.fields.iter().zip(&values) {
            let found = value.to_raw_type();
            if &found != ty {
                return Err(ConstructionError::Mismatch {
                    expected: ty.clone(),
                    found,
                });
            }
        }
        Ok(Self {
            registry: registry.clone(),
            def,
            values,
            meta: CodecMeta::new(),
        })
    }

    /// Values produced by the registry under each field's type name; an
    /// aliased constructor may report a different raw type, so no check.
    fn from_values(
        registry: &RegistryRef,
        def: &Arc<StructDef>,
        values: Vec<Box<dyn Codec>>,
    ) -> Self {
        Self {
            registry: registry.clone(),
            def: def.clone(),
            values,
            meta: CodecMeta::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&dyn Codec> {
        let index = self.def.fields.iter().position(|(name, _)| name == field)?;
        self.get_at_index(index)
    }

    pub fn get_at_index(&self, index: usize) -> Option<&dyn Codec> {
        self.values.get(index).map(|value| &**value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when every field encodes to zero bytes, not when there are no fields.
    pub fn is_empty(&self) -> bool {
        Codec::is_empty(self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.def.fields.iter().map(|(name, _)| name.as_str())
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &str, &dyn Codec)> {
        self.def
            .fields
            .iter()
            .zip(&self.values)
            .map(|((name, ty), value)| (name.as_str(), ty.as_str(), &**value))
    }

    fn project(&self, f: impl Fn(&str, &dyn Codec) -> Value) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .map(|(name, ty, value)| (name.to_owned(), f(ty, value)))
            .collect();
        Value::Object(map)
    }
}

impl PartialEq for Struct {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def && self.values == other.values
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for Struct {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        self.entries()
            .flat_map(|(name, _, value)| value.to_bytes(bare.field(name)))
            .collect()
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        let inner = self
            .entries()
            .map(|(name, _, value)| value.inspect(bare.field(name)).named(name))
            .collect();
        Inspect::new(Vec::new(), inner)
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    /// The extended form pairs each field's value with its type name.
    fn to_human(&self, is_extended: bool) -> Value {
        if is_extended {
            self.project(|ty, value| json!({ "type": ty, "value": value.to_human(true) }))
        } else {
            self.project(|_, value| value.to_human(false))
        }
    }

    fn to_json(&self) -> Value {
        self.project(|_, value| value.to_json())
    }

    fn to_primitive(&self) -> Value {
        self.project(|_, value| value.to_primitive())
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

impl CodecType for Struct {
    type Def = Arc<StructDef>;

    fn decode_with(
        registry: &RegistryRef,
        def: &Arc<StructDef>,
        input: &[u8],
    ) -> Result<Self, CodecError> {
        let mut offset = 0;
        let mut values = Vec::with_capacity(def.fields.len());
        for (_, ty) in &def.fields {
            let (value, consumed) = decode_type(registry, ty, &input[offset..])?;
            offset += consumed;
            values.push(value);
        }
        Ok(Self {
            registry: registry.clone(),
            def: def.clone(),
            values,
            meta: CodecMeta::decoded(offset),
        })
    }

    fn default_with(registry: &RegistryRef, def: &Arc<StructDef>) -> Result<Self, CodecError> {
        let values = def
            .fields
            .iter()
            .map(|(_, ty)| create_type(registry, ty, CodecInput::Default))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_values(registry, def, values))
    }

    /// Accepts an object keyed by field name (missing fields take their
    /// default) or an array of values in declaration order.
    fn from_primitive_with(
        registry: &RegistryRef,
        def: &Arc<StructDef>,
        value: &Value,
    ) -> Result<Self, CodecError> {
        let values = match value {
            Value::Object(map) => def
                .fields
                .iter()
                .map(|(name, ty)| {
                    let input = map.get(name).map_or(CodecInput::Default, CodecInput::Primitive);
                    create_type(registry, ty, input)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Value::Array(items) if items.len() == def.fields.len() => def
                .fields
                .iter()
                .zip(items)
                .map(|((_, ty), item)| create_type(registry, ty, CodecInput::Primitive(item)))
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(ConstructionError::mismatch(def.name.as_str(), other).into()),
        };
        Ok(Self::from_values(registry, def, values))
    }

    fn raw_type_of(def: &Arc<StructDef>) -> String {
        def.name.clone()
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
