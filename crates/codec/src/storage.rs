//! Decoding values read from storage.
//!
//! A storage read yields either the stored bytes or nothing. When nothing
//! is stored the value falls back to a default and records that in
//! `is_storage_fallback`, so callers can tell "stored zero" from "absent".

use crate::codec::{Codec, CodecInput, CodecType};
use crate::error::CodecError;
use crate::hash::CodecHash;
use crate::registry::{create_type, RegistryRef};

fn is_absent(raw: Option<&[u8]>) -> bool {
    raw.map_or(true, <[u8]>::is_empty)
}

fn stamp<C: Codec + ?Sized>(
    value: &C,
    fallback: bool,
    at: Option<CodecHash>,
) -> Result<(), CodecError> {
    value.meta().set_is_storage_fallback(fallback)?;
    if let Some(hash) = at {
        value.meta().set_created_at_hash(hash)?;
    }
    Ok(())
}

/// Decodes a stored `T`, falling back to its default when nothing is stored.
pub fn decode_storage<T>(
    registry: &RegistryRef,
    raw: Option<&[u8]>,
    at: Option<CodecHash>,
) -> Result<T, CodecError>
where
    T: CodecType,
    T::Def: Default,
{
    decode_storage_with(registry, &T::Def::default(), raw, at)
}

/// [`decode_storage`] for shapes that need an explicit definition.
pub fn decode_storage_with<T: CodecType>(
    registry: &RegistryRef,
    def: &T::Def,
    raw: Option<&[u8]>,
    at: Option<CodecHash>,
) -> Result<T, CodecError> {
    let (value, fallback) = match raw {
        Some(bytes) if !bytes.is_empty() => (T::decode_with(registry, def, bytes)?, false),
        _ => {
            tracing::debug!(type_name = %T::raw_type_of(def), "storage empty, using default");
            (T::default_with(registry, def)?, true)
        }
    };
    stamp(&value, fallback, at)?;
    Ok(value)
}

/// Decodes a stored value of the named type, falling back to the type's
/// default when nothing is stored.
pub fn decode_storage_type(
    registry: &RegistryRef,
    type_name: &str,
    raw: Option<&[u8]>,
    at: Option<CodecHash>,
) -> Result<Box<dyn Codec>, CodecError> {
    let fallback = is_absent(raw);
    let input = match raw {
        Some(bytes) if !fallback => CodecInput::Bytes(bytes),
        _ => {
            tracing::debug!(type_name, "storage empty, using default");
            CodecInput::Default
        }
    };
    let value = create_type(registry, type_name, input)?;
    stamp(&*value, fallback, at)?;
    Ok(value)
}

/// Like [`decode_storage_type`], but an absent entry decodes `fallback_bytes`
/// instead of the type's default.
pub fn decode_storage_type_or(
    registry: &RegistryRef,
    type_name: &str,
    raw: Option<&[u8]>,
    fallback_bytes: &[u8],
    at: Option<CodecHash>,
) -> Result<Box<dyn Codec>, CodecError> {
    let fallback = is_absent(raw);
    let bytes = match raw {
        Some(bytes) if !fallback => bytes,
        _ => {
            tracing::debug!(type_name, "storage empty, using declared fallback");
            fallback_bytes
        }
    };
    let value = create_type(registry, type_name, CodecInput::Bytes(bytes))?;
    stamp(&*value, fallback, at)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::registry::TypeRegistry;
    use crate::types::U32;

    #[test]
    fn absent_and_empty_fall_back() {
        let registry = TypeRegistry::new().into_ref();
        for raw in [None, Some(&[][..])] {
            let value = decode_storage::<U32>(&registry, raw, None).unwrap();
            assert_eq!(value.value(), 0);
            assert_eq!(value.is_storage_fallback(), Some(true));
            assert_eq!(value.initial_u8a_length(), None);
        }
    }

    #[test]
    fn stored_zero_is_not_fallback() {
        let registry = TypeRegistry::new().into_ref();
        let at = CodecHash::of(b"block");
        let value = decode_storage::<U32>(&registry, Some(&[0, 0, 0, 0]), Some(at)).unwrap();
        assert_eq!(value.is_storage_fallback(), Some(false));
        assert_eq!(value.created_at_hash(), Some(at));
        assert_eq!(value.initial_u8a_length(), Some(4));
    }

    #[test]
    fn decode_failure_is_surfaced() {
        let registry = TypeRegistry::new().into_ref();
        let err = decode_storage_type(&registry, "u32", Some(&[1, 2]), None).unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::UnexpectedEnd(_))));
    }

    #[test]
    fn declared_fallback_bytes() {
        let registry = TypeRegistry::new().into_ref();
        let value = decode_storage_type_or(&registry, "u16", None, &[7, 0], None).unwrap();
        assert_eq!(value.to_json(), serde_json::json!(7));
        assert_eq!(value.is_storage_fallback(), Some(true));

        let stored = decode_storage_type_or(&registry, "u16", Some(&[9, 0]), &[7, 0], None).unwrap();
        assert_eq!(stored.to_json(), serde_json::json!(9));
        assert_eq!(stored.is_storage_fallback(), Some(false));
    }
}
