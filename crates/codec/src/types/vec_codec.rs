//! Homogeneous sequences.

use std::any::Any;
use std::fmt;

use scale_types_buffers::Writer;
use scale_types_util::{compact_from_u8a, compact_to_u8a, write_compact};
use serde_json::Value;

use super::ensure_length;
use crate::codec::{codec_eq, BareOpts, Codec, CodecInput, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::{create_type, decode_type, RegistryRef};

/// Largest item count [`VecCodec`] will hold.
pub const MAX_VEC_LENGTH: usize = 64 * 1024;

/// Element type of a `Vec<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecDef {
    elem: String,
}

impl VecDef {
    pub fn new(elem: impl Into<String>) -> Self {
        Self { elem: elem.into() }
    }

    pub fn elem(&self) -> &str {
        &self.elem
    }
}

/// `Vec<T>`: a compact item count followed by each item's full encoding.
#[derive(Debug, Clone)]
pub struct VecCodec {
    registry: RegistryRef,
    def: VecDef,
    items: Vec<Box<dyn Codec>>,
    meta: CodecMeta,
}

impl VecCodec {
    /// Builds a sequence from already constructed items, which must all be
    /// of the element type and number at most [`MAX_VEC_LENGTH`].
    pub fn new(
        registry: &RegistryRef,
        def: VecDef,
        items: Vec<Box<dyn Codec>>,
    ) -> Result<Self, ConstructionError> {
        ensure_length(&Self::raw_type_of(&def), items.len(), MAX_VEC_LENGTH)?;
        if let Some(item) = items.iter().find(|item| item.to_raw_type() != def.elem) {
            return Err(ConstructionError::Mismatch {
                expected: def.elem.clone(),
                found: item.to_raw_type(),
            });
        }
        Ok(Self {
            registry: registry.clone(),
            def,
            items,
            meta: CodecMeta::new(),
        })
    }

    pub fn elem_type(&self) -> &str {
        &self.def.elem
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        Codec::is_empty(self)
    }

    pub fn get(&self, index: usize) -> Option<&dyn Codec> {
        self.items.get(index).map(|item| &**item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Codec> {
        self.items.iter().map(|item| &**item)
    }

    fn project(&self, f: impl Fn(&dyn Codec) -> Value) -> Value {
        Value::Array(self.iter().map(f).collect())
    }
}

impl PartialEq for VecCodec {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def && self.items == other.items
    }
}

impl fmt::Display for VecCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for VecCodec {
    fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    fn meta(&self) -> &CodecMeta {
        &self.meta
    }

    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8> {
        let mut writer = Writer::new();
        if !bare.is_bare() {
            write_compact(&mut writer, self.items.len() as u128);
        }
        for item in &self.items {
            writer.buf(&item.to_bytes(bare.item()));
        }
        writer.flush()
    }

    fn inspect(&self, bare: &BareOpts) -> Inspect {
        let outer = if bare.is_bare() {
            Vec::new()
        } else {
            vec![compact_to_u8a(self.items.len() as u128)]
        };
        let inner = self.iter().map(|item| item.inspect(bare.item())).collect();
        Inspect::new(outer, inner)
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        codec_eq(self, other)
    }

    fn to_human(&self, is_extended: bool) -> Value {
        self.project(|item| item.to_human(is_extended))
    }

    fn to_json(&self) -> Value {
        self.project(|item| item.to_json())
    }

    fn to_primitive(&self) -> Value {
        self.project(|item| item.to_primitive())
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
        self.items.is_empty()
    }
}

impl CodecType for VecCodec {
    type Def = VecDef;

    fn decode_with(registry: &RegistryRef, def: &VecDef, input: &[u8]) -> Result<Self, CodecError> {
        let (mut offset, count) = compact_from_u8a(input)?;
        if count > MAX_VEC_LENGTH as u128 {
            return Err(DecodeError::LengthTooLarge {
                type_name: Self::raw_type_of(def),
                length: count,
                max: MAX_VEC_LENGTH,
            }
            .into());
        }
        let count = count as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let (item, consumed) = decode_type(registry, &def.elem, &input[offset..])?;
            offset += consumed;
            items.push(item);
        }
        Ok(Self {
            registry: registry.clone(),
            def: def.clone(),
            items,
            meta: CodecMeta::decoded(offset),
        })
    }

    fn default_with(registry: &RegistryRef, def: &VecDef) -> Result<Self, CodecError> {
        Ok(Self::new(registry, def.clone(), Vec::new())?)
    }

    /// Accepts an array whose entries are each valid primitives of the
    /// element type.
    fn from_primitive_with(
        registry: &RegistryRef,
        def: &VecDef,
        value: &Value,
    ) -> Result<Self, CodecError> {
        let Value::Array(entries) = value else {
            return Err(ConstructionError::mismatch(Self::raw_type_of(def), value).into());
        };
        ensure_length(&Self::raw_type_of(def), entries.len(), MAX_VEC_LENGTH)?;
        let items = entries
            .iter()
            .map(|entry| create_type(registry, &def.elem, CodecInput::Primitive(entry)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            registry: registry.clone(),
            def: def.clone(),
            items,
            meta: CodecMeta::new(),
        })
    }

    fn raw_type_of(def: &VecDef) -> String {
        format!("Vec<{}>", def.elem)
    }

    fn meta_mut(&mut self) -> &mut CodecMeta {
        &mut self.meta
    }
}
