//! Bounded Byte Cursor
//!
//! Sequential, bounds-checked reads over a borrowed buffer. Every SDP read in
//! this crate goes through a [`Cursor`]; composite elements hand their children
//! a [`Cursor::sub_cursor`] so a malformed child can never read into the bytes
//! of its siblings.

use super::DataElementError;

/// Read position over a fixed byte buffer
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Bytes visible to this cursor
    data: &'a [u8],
    /// Offset of the next unread byte
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `data`
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of unread bytes
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Number of bytes consumed so far
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Check whether every byte has been consumed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<(), DataElementError> {
        if self.remaining() < needed {
            return Err(DataElementError::TruncatedInput {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consume the next byte
    ///
    /// # Errors
    /// Returns `TruncatedInput` if the cursor is exhausted
    pub fn take_byte(&mut self) -> Result<u8, DataElementError> {
        self.ensure(1)?;
        let byte = self.data[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Consume the next `n` bytes
    ///
    /// The position is left untouched when the read fails.
    ///
    /// # Errors
    /// Returns `TruncatedInput` if fewer than `n` bytes remain
    pub fn take_bytes(&mut self, n: usize) -> Result<&'a [u8], DataElementError> {
        self.ensure(n)?;
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    /// Consume a big-endian `u16`
    ///
    /// # Errors
    /// Returns `TruncatedInput` if fewer than 2 bytes remain
    pub fn take_u16_be(&mut self) -> Result<u16, DataElementError> {
        let bytes = self.take_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Consume a big-endian `u32`
    ///
    /// # Errors
    /// Returns `TruncatedInput` if fewer than 4 bytes remain
    pub fn take_u32_be(&mut self) -> Result<u32, DataElementError> {
        let bytes = self.take_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Split off a cursor over exactly the next `n` bytes
    ///
    /// The parent advances past those bytes immediately; the returned cursor
    /// cannot see anything beyond them.
    ///
    /// # Errors
    /// Returns `TruncatedInput` if fewer than `n` bytes remain
    pub fn sub_cursor(&mut self, n: usize) -> Result<Cursor<'a>, DataElementError> {
        self.take_bytes(n).map(Cursor::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_byte() {
        let mut cursor = Cursor::new(&[0x01, 0x02]);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.take_byte(), Ok(0x01));
        assert_eq!(cursor.take_byte(), Ok(0x02));
        assert!(cursor.is_empty());
        assert_eq!(
            cursor.take_byte(),
            Err(DataElementError::TruncatedInput {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn test_take_bytes_failure_keeps_position() {
        let mut cursor = Cursor::new(&[0xAA, 0xBB, 0xCC]);
        assert_eq!(cursor.take_bytes(1), Ok(&[0xAA][..]));

        assert_eq!(
            cursor.take_bytes(3),
            Err(DataElementError::TruncatedInput {
                needed: 3,
                remaining: 2
            })
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.take_bytes(2), Ok(&[0xBB, 0xCC][..]));
    }

    #[test]
    fn test_take_zero_bytes() {
        let mut cursor = Cursor::new(&[]);
        assert_eq!(cursor.take_bytes(0), Ok(&[][..]));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_big_endian_helpers() {
        let mut cursor = Cursor::new(&[0x01, 0x2C, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(cursor.take_u16_be(), Ok(300));
        assert_eq!(cursor.take_u32_be(), Ok(0x0001_0000));
        assert!(cursor.take_u16_be().is_err());
    }

    #[test]
    fn test_sub_cursor_is_bounded() {
        let mut cursor = Cursor::new(&[0x01, 0x02, 0x03, 0x04]);
        let mut sub = cursor.sub_cursor(2).unwrap();

        assert_eq!(cursor.position(), 2);
        assert_eq!(sub.remaining(), 2);
        assert_eq!(sub.take_bytes(2), Ok(&[0x01, 0x02][..]));
        assert!(sub.take_byte().is_err());

        // Parent continues after the sub-range
        assert_eq!(cursor.take_byte(), Ok(0x03));
    }

    #[test]
    fn test_sub_cursor_truncated() {
        let mut cursor = Cursor::new(&[0x01]);
        assert_eq!(
            cursor.sub_cursor(2).unwrap_err(),
            DataElementError::TruncatedInput {
                needed: 2,
                remaining: 1
            }
        );
        assert_eq!(cursor.position(), 0);
    }
}
