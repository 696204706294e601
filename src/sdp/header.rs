//! SDP Data Element Header Decoding
//!
//! Every data element starts with a one-byte type descriptor: the high five
//! bits carry the type code and the low three bits the size descriptor. Size
//! descriptors 5, 6 and 7 are followed by a big-endian length field of 1, 2 or
//! 4 bytes.

use super::{Cursor, DataElementError};
use crate::constants::{SIZE_DESCRIPTOR_MASK, TYPE_DESCRIPTOR_SHIFT};

/// Data element type identifier
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataElementType {
    /// Nil (null value)
    Nil = 0,
    /// Unsigned integer
    UnsignedInt = 1,
    /// Signed two's-complement integer
    SignedInt = 2,
    /// UUID
    Uuid = 3,
    /// Text string
    TextString = 4,
    /// Boolean
    Boolean = 5,
    /// Data element sequence
    Sequence = 6,
    /// Data element alternative
    Alternative = 7,
    /// URL
    Url = 8,
}

/// Data element size descriptor
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataElementSize {
    /// 1 byte (0 bytes for Nil)
    Size1 = 0,
    /// 2 bytes
    Size2 = 1,
    /// 4 bytes
    Size4 = 2,
    /// 8 bytes
    Size8 = 3,
    /// 16 bytes
    Size16 = 4,
    /// Additional 8-bit size field follows
    AdditionalU8 = 5,
    /// Additional 16-bit size field follows
    AdditionalU16 = 6,
    /// Additional 32-bit size field follows
    AdditionalU32 = 7,
}

/// Decoded data element header
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataElementHeader {
    /// Element type
    pub kind: DataElementType,
    /// Size descriptor as received
    pub size: DataElementSize,
    /// Payload length for scalars, content length for composites
    pub declared_length: usize,
}

impl DataElementType {
    /// Convert to the 5-bit wire code
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Create from a 5-bit wire code
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Nil),
            1 => Some(Self::UnsignedInt),
            2 => Some(Self::SignedInt),
            3 => Some(Self::Uuid),
            4 => Some(Self::TextString),
            5 => Some(Self::Boolean),
            6 => Some(Self::Sequence),
            7 => Some(Self::Alternative),
            8 => Some(Self::Url),
            _ => None,
        }
    }

    /// Check if elements of this type contain other data elements
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Sequence | Self::Alternative)
    }

    /// Check if this type is sized with a fixed 2^n byte payload
    #[must_use]
    pub const fn uses_fixed_size(self) -> bool {
        matches!(
            self,
            Self::Nil | Self::UnsignedInt | Self::SignedInt | Self::Uuid | Self::Boolean
        )
    }
}

impl DataElementSize {
    /// Create from the low three bits of a type descriptor byte
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & SIZE_DESCRIPTOR_MASK {
            0 => Self::Size1,
            1 => Self::Size2,
            2 => Self::Size4,
            3 => Self::Size8,
            4 => Self::Size16,
            5 => Self::AdditionalU8,
            6 => Self::AdditionalU16,
            _ => Self::AdditionalU32,
        }
    }

    /// Payload length for fixed descriptors
    #[must_use]
    pub const fn fixed_length(self) -> Option<usize> {
        match self {
            Self::Size1 => Some(1),
            Self::Size2 => Some(2),
            Self::Size4 => Some(4),
            Self::Size8 => Some(8),
            Self::Size16 => Some(16),
            _ => None,
        }
    }

    /// Width of the additional length field
    #[must_use]
    pub const fn length_field_size(self) -> usize {
        match self {
            Self::AdditionalU8 => 1,
            Self::AdditionalU16 => 2,
            Self::AdditionalU32 => 4,
            _ => 0,
        }
    }
}

impl DataElementHeader {
    /// Bytes the header occupies on the wire, including any length field
    #[must_use]
    pub const fn header_len(&self) -> usize {
        1 + self.size.length_field_size()
    }

    /// Decode one header from the cursor
    ///
    /// # Errors
    /// Returns `UnknownType` for type codes above 8, `InvalidSizeDescriptor`
    /// when the size descriptor does not fit the type, and `TruncatedInput`
    /// if the header or its length field is cut short
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DataElementError> {
        let descriptor = cursor.take_byte()?;
        let code = descriptor >> TYPE_DESCRIPTOR_SHIFT;
        let kind = DataElementType::from_u8(code).ok_or(DataElementError::UnknownType(code))?;
        let size = DataElementSize::from_bits(descriptor);

        let invalid = DataElementError::InvalidSizeDescriptor {
            kind,
            descriptor: size as u8,
        };

        let declared_length = match size.fixed_length() {
            Some(_) if kind == DataElementType::Nil => 0,
            Some(1) if kind == DataElementType::Boolean => 1,
            Some(_) if kind == DataElementType::Boolean => return Err(invalid),
            Some(length) if kind.uses_fixed_size() => length,
            Some(_) => return Err(invalid),
            None if kind.uses_fixed_size() => return Err(invalid),
            None => match size {
                DataElementSize::AdditionalU8 => usize::from(cursor.take_byte()?),
                DataElementSize::AdditionalU16 => usize::from(cursor.take_u16_be()?),
                _ => {
                    let length = cursor.take_u32_be()?;
                    // Lengths beyond the address space can never be satisfied
                    usize::try_from(length).map_err(|_| DataElementError::TruncatedInput {
                        needed: usize::MAX,
                        remaining: cursor.remaining(),
                    })?
                }
            },
        };

        Ok(Self {
            kind,
            size,
            declared_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<(DataElementHeader, usize), DataElementError> {
        let mut cursor = Cursor::new(bytes);
        let header = DataElementHeader::decode(&mut cursor)?;
        Ok((header, cursor.position()))
    }

    #[test]
    fn test_type_conversion() {
        assert_eq!(DataElementType::from_u8(6), Some(DataElementType::Sequence));
        assert_eq!(DataElementType::Url.to_u8(), 8);
        assert_eq!(DataElementType::from_u8(9), None);
        assert!(DataElementType::Alternative.is_composite());
        assert!(!DataElementType::TextString.is_composite());
    }

    #[test]
    fn test_fixed_size_header() {
        let (header, consumed) = decode(&[0x09]).unwrap();
        assert_eq!(header.kind, DataElementType::UnsignedInt);
        assert_eq!(header.size, DataElementSize::Size2);
        assert_eq!(header.declared_length, 2);
        assert_eq!(header.header_len(), 1);
        assert_eq!(consumed, 1);

        let (header, _) = decode(&[0x1C]).unwrap();
        assert_eq!(header.kind, DataElementType::Uuid);
        assert_eq!(header.declared_length, 16);
    }

    #[test]
    fn test_nil_length_forced_to_zero() {
        for descriptor in 0x00..=0x04 {
            let (header, _) = decode(&[descriptor]).unwrap();
            assert_eq!(header.kind, DataElementType::Nil);
            assert_eq!(header.declared_length, 0);
        }
        assert!(matches!(
            decode(&[0x05, 0x00]),
            Err(DataElementError::InvalidSizeDescriptor {
                kind: DataElementType::Nil,
                descriptor: 5
            })
        ));
    }

    #[test]
    fn test_boolean_must_be_one_byte() {
        let (header, _) = decode(&[0x28]).unwrap();
        assert_eq!(header.kind, DataElementType::Boolean);
        assert_eq!(header.declared_length, 1);

        assert!(matches!(
            decode(&[0x29]),
            Err(DataElementError::InvalidSizeDescriptor {
                kind: DataElementType::Boolean,
                descriptor: 1
            })
        ));
        assert!(decode(&[0x2D, 0x01]).is_err());
    }

    #[test]
    fn test_extended_lengths() {
        let (header, consumed) = decode(&[0x25, 0x04]).unwrap();
        assert_eq!(header.kind, DataElementType::TextString);
        assert_eq!(header.declared_length, 4);
        assert_eq!(consumed, 2);

        let (header, consumed) = decode(&[0x36, 0x01, 0x00]).unwrap();
        assert_eq!(header.kind, DataElementType::Sequence);
        assert_eq!(header.declared_length, 256);
        assert_eq!(header.header_len(), 3);
        assert_eq!(consumed, 3);

        let (header, consumed) = decode(&[0x3F, 0x00, 0x01, 0x00, 0x00]).unwrap();
        assert_eq!(header.kind, DataElementType::Alternative);
        assert_eq!(header.declared_length, 0x0001_0000);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_variable_types_reject_fixed_sizes() {
        // Text, Sequence, Alternative and URL with size descriptor 0
        for descriptor in [0x20, 0x30, 0x38, 0x40] {
            assert!(matches!(
                decode(&[descriptor]),
                Err(DataElementError::InvalidSizeDescriptor { descriptor: 0, .. })
            ));
        }
    }

    #[test]
    fn test_integers_reject_extended_lengths() {
        assert!(matches!(
            decode(&[0x0D, 0x02]),
            Err(DataElementError::InvalidSizeDescriptor {
                kind: DataElementType::UnsignedInt,
                descriptor: 5
            })
        ));
        assert!(decode(&[0x1E, 0x00, 0x02]).is_err());
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            decode(&[0x48]).unwrap_err(),
            DataElementError::UnknownType(9)
        );
        assert_eq!(
            decode(&[0xF8]).unwrap_err(),
            DataElementError::UnknownType(31)
        );
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            decode(&[]),
            Err(DataElementError::TruncatedInput { .. })
        ));
        assert!(matches!(
            decode(&[0x36, 0x01]),
            Err(DataElementError::TruncatedInput {
                needed: 2,
                remaining: 1
            })
        ));
    }
}
