//! Property and edge-case tests for compact, hex and formatting helpers.

use proptest::prelude::*;
use scale_types_util::{
    compact_add_length, compact_from_u8a, compact_strip_length, compact_to_u8a, format_number,
    hex_to_u8a, is_hex, u8a_concat, u8a_eq, u8a_to_hex, CompactError,
};

// ---------------------------------------------------------------------------
// compact
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compact_roundtrip(value in any::<u128>()) {
        let bytes = compact_to_u8a(value);
        prop_assert_eq!(compact_from_u8a(&bytes), Ok((bytes.len(), value)));
    }

    #[test]
    fn compact_ignores_trailing_bytes(value in any::<u64>(), tail in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut bytes = compact_to_u8a(value as u128);
        let consumed = bytes.len();
        bytes.extend_from_slice(&tail);
        prop_assert_eq!(compact_from_u8a(&bytes), Ok((consumed, value as u128)));
    }

    #[test]
    fn compact_decode_never_panics(input in proptest::collection::vec(any::<u8>(), 0..20)) {
        let _ = compact_from_u8a(&input);
    }

    #[test]
    fn hex_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let hex = u8a_to_hex(&bytes);
        prop_assert!(is_hex(&hex));
        prop_assert_eq!(hex_to_u8a(&hex).unwrap(), bytes);
    }
}

#[test]
fn compact_lengths_by_mode() {
    let cases: &[(u128, usize)] = &[
        (0, 1),
        (63, 1),
        (64, 2),
        (16383, 2),
        (16384, 4),
        ((1 << 30) - 1, 4),
        (1 << 30, 5),
        (u32::MAX as u128, 5),
        (1 << 32, 6),
        (u128::MAX, 17),
    ];
    for (value, len) in cases {
        assert_eq!(compact_to_u8a(*value).len(), *len, "value {value}");
    }
}

#[test]
fn compact_strip_length_of_empty_payload() {
    assert_eq!(compact_add_length(&[]), vec![0x00]);
    assert_eq!(compact_strip_length(&[0x00, 0xaa]), Ok((1, vec![])));
}

#[test]
fn compact_error_messages() {
    let err = compact_from_u8a(&[0x05, 0x00]).unwrap_err();
    assert_eq!(err, CompactError::NonCanonical(1));
    assert_eq!(err.to_string(), "non-canonical compact encoding of 1");
}

// ---------------------------------------------------------------------------
// u8a / format
// ---------------------------------------------------------------------------

#[test]
fn u8a_helpers() {
    let joined = u8a_concat(&[&[0x01], &[0x02, 0x03]]);
    assert!(u8a_eq(&joined, &[1, 2, 3]));
    assert!(!u8a_eq(&joined, &[1, 2]));
    assert!(u8a_concat(&[]).is_empty());
}

#[test]
fn format_number_matrix() {
    assert_eq!(format_number(1), "1");
    assert_eq!(format_number(12), "12");
    assert_eq!(format_number(1234), "1,234");
    assert_eq!(format_number(65_535), "65,535");
}
