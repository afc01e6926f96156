//! The Codec contract.
//!
//! Every conforming value implements [`Codec`]: one flat capability set
//! covering encoding, identity, introspection and projection. Shapes that
//! can be constructed also implement [`CodecType`], which carries the
//! construction facet and is what the registry's constructors call into.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use scale_types_util::u8a_to_hex;
use serde_json::Value;

use crate::error::{CodecError, ConstructionError};
use crate::hash::CodecHash;
use crate::inspect::Inspect;
use crate::meta::CodecMeta;
use crate::registry::RegistryRef;

/// Selects whether a value omits its own outer framing.
///
/// `No` is the full encoding, `Yes` drops length prefixes and
/// discriminants the surrounding context already supplies, and `Fields`
/// chooses per named field of a compound value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BareOpts {
    #[default]
    No,
    Yes,
    Fields(BTreeMap<String, BareOpts>),
}

static NOT_BARE: BareOpts = BareOpts::No;
static BARE: BareOpts = BareOpts::Yes;

impl BareOpts {
    /// Per-field selection from `(field, bare)` pairs.
    pub fn fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, BareOpts)>,
        K: Into<String>,
    {
        BareOpts::Fields(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// True only for [`BareOpts::Yes`]; a field map is not bare at its own level.
    pub fn is_bare(&self) -> bool {
        matches!(self, BareOpts::Yes)
    }

    /// The selection that applies to the named child field.
    pub fn field(&self, name: &str) -> &BareOpts {
        match self {
            BareOpts::No => &NOT_BARE,
            BareOpts::Yes => &BARE,
            BareOpts::Fields(map) => map.get(name).unwrap_or(&NOT_BARE),
        }
    }

    /// The selection for unnamed children (sequence items, option payloads).
    pub fn item(&self) -> &BareOpts {
        if self.is_bare() {
            &BARE
        } else {
            &NOT_BARE
        }
    }
}

impl From<bool> for BareOpts {
    fn from(bare: bool) -> Self {
        if bare {
            BareOpts::Yes
        } else {
            BareOpts::No
        }
    }
}

/// The argument a value is constructed from.
#[derive(Debug, Clone, Copy, Default)]
pub enum CodecInput<'a> {
    /// No argument: the shape's default value.
    #[default]
    Default,
    /// Encoded bytes to decode; trailing bytes are left unconsumed.
    Bytes(&'a [u8]),
    /// A native primitive, shaped as JSON.
    Primitive(&'a Value),
    /// Another conforming value to copy.
    Codec(&'a dyn Codec),
}

/// The capability set every conforming value presents.
pub trait Codec: fmt::Debug + fmt::Display + Send + Sync + Any {
    /// The registry that created this value.
    fn registry(&self) -> &RegistryRef;

    fn meta(&self) -> &CodecMeta;

    /// Canonical encoding, optionally without this value's outer framing.
    fn to_bytes(&self, bare: &BareOpts) -> Vec<u8>;

    /// Layout tree whose pre-order `outer` segments equal `to_bytes(bare)`.
    fn inspect(&self, bare: &BareOpts) -> Inspect;

    /// Deep equality on decoded content. Metadata is ignored and values of
    /// different shapes are never equal.
    fn eq_codec(&self, other: &dyn Codec) -> bool;

    fn to_human(&self, is_extended: bool) -> Value;

    fn to_json(&self) -> Value;

    fn to_primitive(&self) -> Value;

    /// The type name this value resolves to in its registry.
    fn to_raw_type(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn clone_codec(&self) -> Box<dyn Codec>;

    fn encoded_length(&self) -> usize {
        self.to_bytes(&BareOpts::No).len()
    }

    /// Bytes consumed when this value was decoded; `None` otherwise.
    fn initial_u8a_length(&self) -> Option<usize> {
        self.meta().initial_u8a_length()
    }

    /// True when the full encoding is all zero bytes.
    fn is_empty(&self) -> bool {
        self.to_bytes(&BareOpts::No).iter().all(|b| *b == 0)
    }

    /// Hex of the full encoding. Numeric shapes read `is_le` as a request
    /// for little-endian digit order, which is the byte order already.
    fn to_hex(&self, _is_le: bool) -> String {
        u8a_to_hex(&self.to_bytes(&BareOpts::No))
    }

    fn hash(&self) -> CodecHash {
        CodecHash::of(&self.to_bytes(&BareOpts::No))
    }

    fn created_at_hash(&self) -> Option<CodecHash> {
        self.meta().created_at_hash()
    }

    fn is_storage_fallback(&self) -> Option<bool> {
        self.meta().is_storage_fallback()
    }
}

impl PartialEq for dyn Codec {
    fn eq(&self, other: &dyn Codec) -> bool {
        self.eq_codec(other)
    }
}

impl Clone for Box<dyn Codec> {
    fn clone(&self) -> Self {
        self.clone_codec()
    }
}

/// Equality through a downcast: `other` must be the same concrete shape.
pub fn codec_eq<T: PartialEq + 'static>(this: &T, other: &dyn Codec) -> bool {
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| this == other)
}

/// The construction facet of one shape.
///
/// `Def` is whatever the shape needs beyond the registry to know its
/// layout: nothing for fixed primitives, the element type for sequences,
/// the field list for structs.
pub trait CodecType: Codec + Clone + Sized {
    type Def: Clone + Send + Sync + 'static;

    /// Decodes from the front of `input`, recording the consumed length.
    fn decode_with(registry: &RegistryRef, def: &Self::Def, input: &[u8])
        -> Result<Self, CodecError>;

    fn default_with(registry: &RegistryRef, def: &Self::Def) -> Result<Self, CodecError>;

    fn from_primitive_with(
        registry: &RegistryRef,
        def: &Self::Def,
        value: &Value,
    ) -> Result<Self, CodecError>;

    fn raw_type_of(def: &Self::Def) -> String;

    fn meta_mut(&mut self) -> &mut CodecMeta;

    /// Dispatches on the shape of `input`.
    fn from_input_with(
        registry: &RegistryRef,
        def: &Self::Def,
        input: CodecInput<'_>,
    ) -> Result<Self, CodecError> {
        match input {
            CodecInput::Default => Self::default_with(registry, def),
            CodecInput::Bytes(bytes) => Self::decode_with(registry, def, bytes),
            CodecInput::Primitive(value) => Self::from_primitive_with(registry, def, value),
            CodecInput::Codec(other) => {
                let expected = Self::raw_type_of(def);
                let found = other.to_raw_type();
                if expected != found {
                    return Err(ConstructionError::Mismatch { expected, found }.into());
                }
                let mut value = Self::decode_with(registry, def, &other.to_bytes(&BareOpts::No))?;
                value.meta_mut().clear_initial_u8a_length();
                Ok(value)
            }
        }
    }

    fn decode(registry: &RegistryRef, input: &[u8]) -> Result<Self, CodecError>
    where
        Self::Def: Default,
    {
        Self::decode_with(registry, &Self::Def::default(), input)
    }

    fn from_input(registry: &RegistryRef, input: CodecInput<'_>) -> Result<Self, CodecError>
    where
        Self::Def: Default,
    {
        Self::from_input_with(registry, &Self::Def::default(), input)
    }

    fn default_value(registry: &RegistryRef) -> Result<Self, CodecError>
    where
        Self::Def: Default,
    {
        Self::default_with(registry, &Self::Def::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_opts_field_selection() {
        let opts = BareOpts::fields([("a", BareOpts::Yes)]);
        assert!(!opts.is_bare());
        assert!(opts.field("a").is_bare());
        assert!(!opts.field("b").is_bare());
        assert!(!opts.item().is_bare());
        assert!(BareOpts::Yes.field("anything").is_bare());
        assert!(BareOpts::Yes.item().is_bare());
        assert_eq!(BareOpts::from(false), BareOpts::No);
        assert_eq!(BareOpts::default(), BareOpts::No);
    }
}
