//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides checked,
/// little-endian reads. A failed read leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use scale_types_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0302);
/// assert!(reader.u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

macro_rules! read_le {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Reads a little-endian `", stringify!($ty), "`.")]
        #[inline]
        pub fn $name(&mut self) -> Result<$ty, BufferError> {
            const N: usize = std::mem::size_of::<$ty>();
            let bytes = self.buf(N)?;
            let mut arr = [0u8; N];
            arr.copy_from_slice(bytes);
            Ok(<$ty>::from_le_bytes(arr))
        }
    };
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.uint8 = uint8;
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    fn ensure(&self, needed: usize) -> Result<(), BufferError> {
        let available = self.size();
        if needed > available {
            return Err(BufferError::EndOfBuffer { needed, available });
        }
        Ok(())
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.ensure(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..x + size])
    }

    /// Returns everything after the cursor without advancing it.
    pub fn rest(&self) -> &'a [u8] {
        &self.uint8[self.x..]
    }

    read_le!(u8, u8);
    read_le!(u16, u16);
    read_le!(u32, u32);
    read_le!(u64, u64);
    read_le!(u128, u128);
}
