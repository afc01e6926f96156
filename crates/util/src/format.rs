//! Human-readable number formatting.

/// Formats an unsigned integer with `,` thousands separators.
///
/// ```
/// use scale_types_util::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(999), "999");
/// assert_eq!(format_number(1_234_567), "1,234,567");
/// ```
pub fn format_number(value: u128) -> String {
    let digits = value.to_string();
    let first = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
