//! Reference shapes implementing the Codec contract.
//!
//! Fixed primitives ([`Null`], [`Bool`], [`UInt`], [`Compact`], [`Bytes`],
//! [`Text`]) plus the compound shapes ([`VecCodec`], [`OptionCodec`],
//! [`Struct`], [`Enum`]) whose children are resolved through the registry.

mod boolean;
mod bytes;
mod compact;
mod enum_codec;
mod null;
mod numeric;
mod option_codec;
mod struct_codec;
mod text;
mod uint;
mod vec_codec;

pub use boolean::Bool;
pub use bytes::{Bytes, MAX_BYTES_LENGTH};
pub use compact::Compact;
pub use enum_codec::{Enum, EnumDef, MAX_ENUM_VARIANTS};
pub use null::Null;
pub use option_codec::{OptionCodec, OptionDef};
pub use struct_codec::{Struct, StructDef};
pub use text::{Text, MAX_TEXT_LENGTH};
pub use uint::{UInt, U128, U16, U32, U64, U8};
pub use vec_codec::{VecCodec, VecDef, MAX_VEC_LENGTH};

use scale_types_buffers::Reader;
use scale_types_util::compact_from_u8a;

use crate::error::{CodecError, ConstructionError, DecodeError};

/// Splits a compact-length-prefixed payload off the front of `input`.
///
/// Returns the payload and the total number of bytes consumed.
fn decode_prefixed<'a>(
    type_name: &str,
    input: &'a [u8],
    max: usize,
) -> Result<(&'a [u8], usize), CodecError> {
    let (offset, length) = compact_from_u8a(input)?;
    if length > max as u128 {
        return Err(DecodeError::LengthTooLarge {
            type_name: type_name.to_owned(),
            length,
            max,
        }
        .into());
    }
    let length = length as usize;
    let payload = Reader::new(&input[offset..]).buf(length)?;
    Ok((payload, offset + length))
}

/// Holds constructed values to the same bound their decoder enforces.
fn ensure_length(type_name: &str, length: usize, max: usize) -> Result<(), ConstructionError> {
    if length > max {
        return Err(ConstructionError::TooLong {
            type_name: type_name.to_owned(),
            length,
            max,
        });
    }
    Ok(())
}
