//! Hex preview of byte slices for debug output and error messages.

use std::fmt::Write;

/// Formats at most `max` bytes as space-separated lowercase hex.
///
/// Bytes past `max` are summarised as a `... (N more)` suffix so that
/// previews of large decode inputs stay readable in logs.
///
/// # Example
///
/// ```
/// use scale_types_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[0x01, 0x02, 0x03], 2), "01 02... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut out = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    if octets.len() > max {
        let _ = write!(out, "... ({} more)", octets.len() - max);
    }
    out
}

/// [`print_octets`] capped at 16 bytes.
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_octets_single() {
        assert_eq!(print_octets(&[0x01], 16), "01");
    }

    #[test]
    fn test_print_octets_zero_max() {
        assert_eq!(print_octets(&[0x01, 0x02], 0), "... (2 more)");
    }

    #[test]
    fn test_print_octets_default_truncates_at_16() {
        let data = [0u8; 17];
        assert!(print_octets_default(&data).ends_with("00... (1 more)"));
    }
}
