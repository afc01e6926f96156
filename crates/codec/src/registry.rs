//! Type registry: resolves type names to constructors.
//!
//! Values only ever see a [`RegistryRef`]; [`TypeRegistry`] is the bundled
//! implementation, with the reference shapes pre-registered and generic
//! wrappers (`Vec<T>`, `Option<T>`, `Compact<uN>`) resolved from the name.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use scale_types_buffers::print_octets_default;

use crate::codec::{Codec, CodecInput, CodecType};
use crate::error::{CodecError, ConstructionError, DecodeError};
use crate::types::{
    Bool, Bytes, Compact, Enum, EnumDef, Null, OptionCodec, OptionDef, Struct, StructDef, Text,
    VecCodec, VecDef, U128, U16, U32, U64, U8,
};

/// Shared handle to a registry; values hold one for their whole lifetime.
pub type RegistryRef = Arc<dyn Registry>;

/// Builds a boxed value of one type from a construction argument.
pub type Constructor = Arc<
    dyn Fn(&RegistryRef, CodecInput<'_>) -> Result<Box<dyn Codec>, CodecError> + Send + Sync,
>;

/// Resolves type names to constructors.
pub trait Registry: Send + Sync + fmt::Debug {
    fn constructor(&self, type_name: &str) -> Option<Constructor>;

    fn has_type(&self, type_name: &str) -> bool {
        self.constructor(type_name).is_some()
    }
}

fn constructor<F>(f: F) -> Constructor
where
    F: Fn(&RegistryRef, CodecInput<'_>) -> Result<Box<dyn Codec>, CodecError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Constructor for shape `T` with a fixed definition.
pub fn constructor_for<T: CodecType>(def: T::Def) -> Constructor {
    constructor(move |registry, input| {
        let value = T::from_input_with(registry, &def, input)?;
        Ok(Box::new(value) as Box<dyn Codec>)
    })
}

/// Deepest chain of nested [`create_type`] calls allowed on one thread.
/// Bounds recursion through self-referential schemas such as
/// `Node { next: Option<Node> }`.
pub const MAX_DEPTH: usize = 64;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of the per-thread nesting budget, released on drop.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Option<Self> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                return None;
            }
            depth.set(current + 1);
            Some(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Resolves `type_name` and constructs a value from `input`.
///
/// Nested values are built through this function too, so it also enforces
/// [`MAX_DEPTH`]: running out fails with `DecodeError::TooDeep` for byte
/// input and `ConstructionError::TooDeep` otherwise.
pub fn create_type(
    registry: &RegistryRef,
    type_name: &str,
    input: CodecInput<'_>,
) -> Result<Box<dyn Codec>, CodecError> {
    let ctor = registry
        .constructor(type_name)
        .ok_or_else(|| ConstructionError::UnknownType(type_name.to_owned()))?;
    let Some(_guard) = DepthGuard::enter() else {
        let type_name = type_name.to_owned();
        tracing::debug!(%type_name, max = MAX_DEPTH, "nesting budget exhausted");
        return Err(match input {
            CodecInput::Bytes(_) => DecodeError::TooDeep {
                type_name,
                max: MAX_DEPTH,
            }
            .into(),
            _ => ConstructionError::TooDeep {
                type_name,
                max: MAX_DEPTH,
            }
            .into(),
        });
    };
    let result = ctor(registry, input);
    if let (Err(err), CodecInput::Bytes(bytes)) = (&result, input) {
        tracing::debug!(
            type_name,
            input = %print_octets_default(bytes),
            error = %err,
            "decode failed"
        );
    }
    result
}

/// Decodes a `type_name` value from the front of `input`.
///
/// Returns the value and the number of bytes it consumed, so compound
/// shapes can continue with the remainder.
pub fn decode_type(
    registry: &RegistryRef,
    type_name: &str,
    input: &[u8],
) -> Result<(Box<dyn Codec>, usize), CodecError> {
    let value = create_type(registry, type_name, CodecInput::Bytes(input))?;
    let consumed = value
        .initial_u8a_length()
        .unwrap_or_else(|| value.encoded_length());
    Ok((value, consumed))
}

/// The bundled registry.
///
/// Populate it, then freeze it with [`TypeRegistry::into_ref`]; registration
/// needs `&mut self`, so a shared registry can no longer change.
pub struct TypeRegistry {
    types: HashMap<String, Constructor>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .finish()
    }
}

impl TypeRegistry {
    /// A registry with the primitive shapes registered.
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry
            .register("Null", constructor_for::<Null>(()))
            .register("bool", constructor_for::<Bool>(()))
            .register("u8", constructor_for::<U8>(()))
            .register("u16", constructor_for::<U16>(()))
            .register("u32", constructor_for::<U32>(()))
            .register("u64", constructor_for::<U64>(()))
            .register("u128", constructor_for::<U128>(()))
            .register("Bytes", constructor_for::<Bytes>(()))
            .register("Text", constructor_for::<Text>(()));
        registry
    }

    /// Registers (or replaces) a constructor under `name`.
    pub fn register(&mut self, name: impl Into<String>, ctor: Constructor) -> &mut Self {
        self.types.insert(name.into(), ctor);
        self
    }

    /// Registers a struct whose fields are `(name, type)` pairs in encoding order.
    pub fn register_struct(&mut self, name: &str, fields: &[(&str, &str)]) -> &mut Self {
        let def = Arc::new(StructDef::new(name, fields));
        self.register(name, constructor_for::<Struct>(def))
    }

    /// Registers an enum whose variants are `(name, payload type)` pairs;
    /// a variant's discriminant is its position, so at most
    /// [`MAX_ENUM_VARIANTS`](crate::types::MAX_ENUM_VARIANTS) are accepted.
    pub fn register_enum(
        &mut self,
        name: &str,
        variants: &[(&str, &str)],
    ) -> Result<&mut Self, ConstructionError> {
        let def = Arc::new(EnumDef::new(name, variants)?);
        Ok(self.register(name, constructor_for::<Enum>(def)))
    }

    pub fn into_ref(self) -> RegistryRef {
        Arc::new(self)
    }

    fn generic(&self, type_name: &str) -> Option<Constructor> {
        if let Some(elem) = strip_wrapper(type_name, "Vec") {
            return self
                .has_type(elem)
                .then(|| constructor_for::<VecCodec>(VecDef::new(elem)));
        }
        if let Some(inner) = strip_wrapper(type_name, "Option") {
            return self
                .has_type(inner)
                .then(|| constructor_for::<OptionCodec>(OptionDef::new(inner)));
        }
        match strip_wrapper(type_name, "Compact")? {
            "u8" => Some(constructor_for::<Compact<1>>(())),
            "u16" => Some(constructor_for::<Compact<2>>(())),
            "u32" => Some(constructor_for::<Compact<4>>(())),
            "u64" => Some(constructor_for::<Compact<8>>(())),
            "u128" => Some(constructor_for::<Compact<16>>(())),
            _ => None,
        }
    }
}

impl Registry for TypeRegistry {
    fn constructor(&self, type_name: &str) -> Option<Constructor> {
        let type_name = type_name.trim();
        let found = match self.types.get(type_name) {
            Some(ctor) => Some(ctor.clone()),
            None => self.generic(type_name),
        };
        tracing::trace!(type_name, found = found.is_some(), "resolve constructor");
        found
    }
}

fn strip_wrapper<'a>(type_name: &'a str, wrapper: &str) -> Option<&'a str> {
    type_name
        .strip_prefix(wrapper)?
        .strip_prefix('<')?
        .strip_suffix('>')
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_wrapper_handles_nesting() {
        assert_eq!(strip_wrapper("Vec<u8>", "Vec"), Some("u8"));
        assert_eq!(strip_wrapper("Vec<Option<u8>>", "Vec"), Some("Option<u8>"));
        assert_eq!(strip_wrapper("Vec< u8 >", "Vec"), Some("u8"));
        assert_eq!(strip_wrapper("VecDeque<u8>", "Vec"), None);
        assert_eq!(strip_wrapper("Vec", "Vec"), None);
    }

    #[test]
    fn resolves_primitives_and_generics() {
        let registry = TypeRegistry::new();
        for name in [
            "Null",
            "bool",
            "u8",
            "u128",
            "Bytes",
            "Text",
            "Vec<u16>",
            "Option<Text>",
            "Vec<Option<u32>>",
            "Compact<u64>",
        ] {
            assert!(registry.has_type(name), "{name}");
        }
        assert!(!registry.has_type("u7"));
        assert!(!registry.has_type("Vec<Unknown>"));
        assert!(!registry.has_type("Compact<Text>"));
    }

    #[test]
    fn unknown_type_is_a_construction_error() {
        let registry = TypeRegistry::new().into_ref();
        let err = create_type(&registry, "Nope", CodecInput::Default).unwrap_err();
        assert_eq!(
            err,
            CodecError::Construction(ConstructionError::UnknownType("Nope".into()))
        );
    }

    #[test]
    fn debug_reports_count_only() {
        let debug = format!("{:?}", TypeRegistry::new());
        assert_eq!(debug, "TypeRegistry { types: 9 }");
    }

    #[test]
    fn self_referential_default_is_bounded() {
        let mut registry = TypeRegistry::new();
        registry.register_struct("Loop", &[("x", "Loop")]);
        let registry = registry.into_ref();
        let err = create_type(&registry, "Loop", CodecInput::Default).unwrap_err();
        assert_eq!(
            err,
            CodecError::Construction(ConstructionError::TooDeep {
                type_name: "Loop".into(),
                max: MAX_DEPTH
            })
        );
    }

    #[test]
    fn recursive_decode_fails_instead_of_overflowing() {
        let mut registry = TypeRegistry::new();
        registry.register_struct("Node", &[("next", "Option<Node>")]);
        let registry = registry.into_ref();

        let err = create_type(&registry, "Node", CodecInput::Bytes(&vec![0x01; 200_000]))
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::TooDeep { max: MAX_DEPTH, .. })
        ));

        // the budget is released on the way out
        let (shallow, consumed) = decode_type(&registry, "Node", &[0x01, 0x01, 0x00]).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(shallow.to_json(), serde_json::json!({"next": {"next": {"next": null}}}));
    }
}
