//! Byte-array helpers.

/// Concatenates byte slices in order.
///
/// ```
/// use scale_types_util::u8a_concat;
///
/// assert_eq!(u8a_concat(&[&[1], &[], &[2, 3]]), vec![1, 2, 3]);
/// ```
pub fn u8a_concat(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Byte-wise equality of two slices.
pub fn u8a_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a == b
}
