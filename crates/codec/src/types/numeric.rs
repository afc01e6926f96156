//! Projection and parsing shared by the unsigned integer shapes.

use scale_types_util::{format_number, hex_to_u8a, u8a_to_hex};
use serde_json::Value;

use crate::error::ConstructionError;

/// Values below this fit a JSON number without losing precision.
const MAX_SAFE: u128 = 1 << 52;

pub(crate) const fn max_for(bytes: usize) -> u128 {
    if bytes >= 16 {
        u128::MAX
    } else {
        (1u128 << (bytes * 8)) - 1
    }
}

pub(crate) fn to_human(value: u128) -> Value {
    Value::String(format_number(value))
}

/// Number when safe, otherwise big-endian hex of the full width.
pub(crate) fn to_json(value: u128, bytes: usize) -> Value {
    if value < MAX_SAFE {
        Value::from(value as u64)
    } else {
        Value::String(u8a_to_hex(&value.to_be_bytes()[16 - bytes..]))
    }
}

/// Number when safe, otherwise a decimal string.
pub(crate) fn to_primitive(value: u128) -> Value {
    if value < MAX_SAFE {
        Value::from(value as u64)
    } else {
        Value::String(value.to_string())
    }
}

/// Accepts a JSON number, a decimal string (`,` separators allowed) or a
/// big-endian `0x` hex string.
pub(crate) fn parse(type_name: &str, max: u128, value: &Value) -> Result<u128, ConstructionError> {
    let out_of_range = |value: String| ConstructionError::OutOfRange {
        type_name: type_name.to_owned(),
        value,
    };
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| out_of_range(n.to_string()))?,
        Value::String(s) if s.starts_with("0x") => {
            let bytes = hex_to_u8a(s)?;
            if bytes.len() > 16 {
                return Err(out_of_range(s.clone()));
            }
            bytes.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b))
        }
        Value::String(s) => s
            .replace(',', "")
            .parse::<u128>()
            .map_err(|_| out_of_range(s.clone()))?,
        other => return Err(ConstructionError::mismatch(type_name, other)),
    };
    if parsed > max {
        return Err(out_of_range(parsed.to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn max_for_widths() {
        assert_eq!(max_for(1), 255);
        assert_eq!(max_for(2), 65_535);
        assert_eq!(max_for(8), u64::MAX as u128);
        assert_eq!(max_for(16), u128::MAX);
    }

    #[test]
    fn json_switches_to_hex_past_52_bits() {
        assert_eq!(to_json((1 << 52) - 1, 8), json!(4_503_599_627_370_495u64));
        assert_eq!(to_json(1 << 52, 8), json!("0x0010000000000000"));
        assert_eq!(to_primitive(1 << 52), json!("4503599627370496"));
    }

    #[test]
    fn parse_matrix() {
        assert_eq!(parse("u16", 65_535, &json!(7)), Ok(7));
        assert_eq!(parse("u16", 65_535, &json!("1,000")), Ok(1000));
        assert_eq!(parse("u16", 65_535, &json!("0x0100")), Ok(256));
        assert!(parse("u8", 255, &json!(256)).is_err());
        assert!(parse("u8", 255, &json!(-1)).is_err());
        assert!(parse("u8", 255, &json!(1.5)).is_err());
        assert!(parse("u8", 255, &json!("abc")).is_err());
        assert!(matches!(
            parse("u8", 255, &json!(true)),
            Err(ConstructionError::Mismatch { .. })
        ));
    }
}
