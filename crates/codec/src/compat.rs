//! Older accessor names, kept as thin aliases of the [`Codec`] methods.

use crate::codec::{BareOpts, Codec};

/// Deprecated spellings of [`Codec`] accessors.
pub trait CodecDeprecated: Codec {
    #[deprecated(note = "use `Codec::to_bytes`")]
    fn to_u8a(&self, is_bare: bool) -> Vec<u8> {
        self.to_bytes(&BareOpts::from(is_bare))
    }

    #[deprecated(note = "use `Codec::encoded_length`")]
    fn encoded_len(&self) -> usize {
        self.encoded_length()
    }

    #[deprecated(note = "use `Codec::is_empty`")]
    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Codec + ?Sized> CodecDeprecated for T {}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::types::Text;

    #[test]
    fn aliases_forward() {
        let registry = TypeRegistry::new().into_ref();
        let value = Text::new(&registry, "ab").unwrap();
        assert_eq!(value.to_u8a(false), vec![0x08, b'a', b'b']);
        assert_eq!(value.to_u8a(true), b"ab".to_vec());
        assert_eq!(value.encoded_len(), 3);
        assert!(!value.is_default());

        let boxed: Box<dyn Codec> = Box::new(Text::new(&registry, "").unwrap());
        assert!(boxed.is_default());
    }
}
