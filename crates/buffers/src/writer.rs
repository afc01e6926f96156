//! Auto-growing binary buffer writer.

/// Writes little-endian binary data into an owned, growable buffer.
///
/// # Example
///
/// ```
/// use scale_types_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u32(1);
/// writer.buf(&[0xff]);
/// assert_eq!(writer.flush(), vec![1, 0, 0, 0, 0xff]);
/// assert!(writer.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    uint8: Vec<u8>,
}

macro_rules! write_le {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Writes a little-endian `", stringify!($ty), "`.")]
        #[inline]
        pub fn $name(&mut self, value: $ty) {
            self.uint8.extend_from_slice(&value.to_le_bytes());
        }
    };
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    write_le!(u8, u8);
    write_le!(u16, u16);
    write_le!(u32, u32);
    write_le!(u64, u64);
    write_le!(u128, u128);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_little_endian() {
        let mut w = Writer::new();
        w.u16(0x0102);
        assert_eq!(w.flush(), vec![0x02, 0x01]);
    }

    #[test]
    fn test_flush_resets() {
        let mut w = Writer::with_capacity(4);
        w.u8(1);
        assert_eq!(w.len(), 1);
        assert_eq!(w.flush(), vec![1]);
        assert_eq!(w.len(), 0);
        w.u8(2);
        w.reset();
        assert!(w.is_empty());
    }
}
