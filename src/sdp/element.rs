//! SDP Data Element Tree
//!
//! A decoded data element is a closed sum type. Scalar payloads borrow from
//! the input buffer; sequences and alternatives own their children directly,
//! so a tree has no back-references and is dropped as a whole.

use super::header::{DataElementSize, DataElementType};
use super::uuid;
use alloc::vec::Vec;
use core::ops::Deref;

/// SDP Data Element
///
/// Represents a data element in an SDP service record attribute.
/// Data elements are the basic building blocks of SDP information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataElement<'a> {
    /// Nil (null value)
    Nil,
    /// Unsigned 8-bit integer
    UnsignedInt8(u8),
    /// Unsigned 16-bit integer
    UnsignedInt16(u16),
    /// Unsigned 32-bit integer
    UnsignedInt32(u32),
    /// Unsigned 64-bit integer
    UnsignedInt64(u64),
    /// Unsigned 128-bit integer
    UnsignedInt128(u128),
    /// Signed 8-bit integer
    SignedInt8(i8),
    /// Signed 16-bit integer
    SignedInt16(i16),
    /// Signed 32-bit integer
    SignedInt32(i32),
    /// Signed 64-bit integer
    SignedInt64(i64),
    /// Signed 128-bit integer
    SignedInt128(i128),
    /// UUID, raw big-endian bytes as received
    Uuid(&'a [u8]),
    /// Boolean value
    Boolean(bool),
    /// Text string, raw bytes as received
    TextString(Payload<'a>),
    /// URL string, raw bytes as received
    Url(Payload<'a>),
    /// Data element sequence
    Sequence(ElementList<'a>),
    /// Data element alternative
    Alternative(ElementList<'a>),
}

/// Variable-length byte payload of a text string or URL
///
/// Remembers which length field the sender used so the encoded size can be
/// reported exactly. Equality compares the bytes only.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    bytes: &'a [u8],
    size: DataElementSize,
}

/// Children of a sequence or alternative
///
/// Equality compares the children only, not the length field encoding.
#[derive(Debug, Clone)]
pub struct ElementList<'a> {
    elements: Vec<DataElement<'a>>,
    size: DataElementSize,
    width: usize,
}

impl<'a> Payload<'a> {
    pub(crate) const fn new(bytes: &'a [u8], size: DataElementSize) -> Self {
        Self { bytes, size }
    }

    /// Raw payload bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Payload as UTF-8, if valid
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    /// Size descriptor used on the wire
    #[must_use]
    pub const fn size_descriptor(&self) -> DataElementSize {
        self.size
    }
}

impl Deref for Payload<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq for Payload<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Payload<'_> {}

impl<'a> ElementList<'a> {
    pub(crate) const fn new(
        elements: Vec<DataElement<'a>>,
        size: DataElementSize,
        width: usize,
    ) -> Self {
        Self {
            elements,
            size,
            width,
        }
    }

    /// Child elements in wire order
    #[must_use]
    pub fn as_slice(&self) -> &[DataElement<'a>] {
        &self.elements
    }

    /// Declared content length in bytes
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Size descriptor used on the wire
    #[must_use]
    pub const fn size_descriptor(&self) -> DataElementSize {
        self.size
    }

    /// Take ownership of the children
    #[must_use]
    pub fn into_vec(self) -> Vec<DataElement<'a>> {
        self.elements
    }
}

impl<'a> Deref for ElementList<'a> {
    type Target = [DataElement<'a>];

    fn deref(&self) -> &[DataElement<'a>] {
        &self.elements
    }
}

impl PartialEq for ElementList<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for ElementList<'_> {}

impl<'a> DataElement<'a> {
    /// Get the data element type
    #[must_use]
    pub const fn data_type(&self) -> DataElementType {
        match self {
            Self::Nil => DataElementType::Nil,
            Self::UnsignedInt8(_)
            | Self::UnsignedInt16(_)
            | Self::UnsignedInt32(_)
            | Self::UnsignedInt64(_)
            | Self::UnsignedInt128(_) => DataElementType::UnsignedInt,
            Self::SignedInt8(_)
            | Self::SignedInt16(_)
            | Self::SignedInt32(_)
            | Self::SignedInt64(_)
            | Self::SignedInt128(_) => DataElementType::SignedInt,
            Self::Uuid(_) => DataElementType::Uuid,
            Self::Boolean(_) => DataElementType::Boolean,
            Self::TextString(_) => DataElementType::TextString,
            Self::Url(_) => DataElementType::Url,
            Self::Sequence(_) => DataElementType::Sequence,
            Self::Alternative(_) => DataElementType::Alternative,
        }
    }

    /// Declared byte length of the payload, or of the content for composites
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Nil => 0,
            Self::UnsignedInt8(_) | Self::SignedInt8(_) | Self::Boolean(_) => 1,
            Self::UnsignedInt16(_) | Self::SignedInt16(_) => 2,
            Self::UnsignedInt32(_) | Self::SignedInt32(_) => 4,
            Self::UnsignedInt64(_) | Self::SignedInt64(_) => 8,
            Self::UnsignedInt128(_) | Self::SignedInt128(_) => 16,
            Self::Uuid(bytes) => bytes.len(),
            Self::TextString(payload) | Self::Url(payload) => payload.len(),
            Self::Sequence(list) | Self::Alternative(list) => list.width(),
        }
    }

    /// Get the encoded size of this data element, header included
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        let length_field = match self {
            Self::TextString(payload) | Self::Url(payload) => {
                payload.size_descriptor().length_field_size()
            }
            Self::Sequence(list) | Self::Alternative(list) => {
                list.size_descriptor().length_field_size()
            }
            _ => 0,
        };
        1 + length_field + self.width()
    }

    /// Check if this is the nil element
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Children of a sequence or alternative; empty for every other type
    #[must_use]
    pub fn children(&self) -> &[DataElement<'a>] {
        match self {
            Self::Sequence(list) | Self::Alternative(list) => list.as_slice(),
            _ => &[],
        }
    }

    /// Exact 8-bit unsigned value
    #[must_use]
    pub const fn as_u8(&self) -> Option<u8> {
        match self {
            Self::UnsignedInt8(value) => Some(*value),
            _ => None,
        }
    }

    /// Exact 16-bit unsigned value
    #[must_use]
    pub const fn as_u16(&self) -> Option<u16> {
        match self {
            Self::UnsignedInt16(value) => Some(*value),
            _ => None,
        }
    }

    /// Exact 32-bit unsigned value
    #[must_use]
    pub const fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UnsignedInt32(value) => Some(*value),
            _ => None,
        }
    }

    /// Exact 64-bit unsigned value
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UnsignedInt64(value) => Some(*value),
            _ => None,
        }
    }

    /// Any unsigned integer, widened
    #[must_use]
    pub const fn as_unsigned(&self) -> Option<u128> {
        match self {
            Self::UnsignedInt8(value) => Some(*value as u128),
            Self::UnsignedInt16(value) => Some(*value as u128),
            Self::UnsignedInt32(value) => Some(*value as u128),
            Self::UnsignedInt64(value) => Some(*value as u128),
            Self::UnsignedInt128(value) => Some(*value),
            _ => None,
        }
    }

    /// Any signed integer, widened
    #[must_use]
    pub const fn as_signed(&self) -> Option<i128> {
        match self {
            Self::SignedInt8(value) => Some(*value as i128),
            Self::SignedInt16(value) => Some(*value as i128),
            Self::SignedInt32(value) => Some(*value as i128),
            Self::SignedInt64(value) => Some(*value as i128),
            Self::SignedInt128(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean value
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Raw payload of a UUID, text string or URL
    #[must_use]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Uuid(bytes) => Some(*bytes),
            Self::TextString(payload) | Self::Url(payload) => Some(payload.as_bytes()),
            _ => None,
        }
    }

    /// Text string or URL as UTF-8
    ///
    /// Returns `None` for other types and for payloads that are not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::TextString(payload) | Self::Url(payload) => payload.as_str(),
            _ => None,
        }
    }

    /// UUID expanded to 128 bits via the Bluetooth Base UUID
    #[must_use]
    pub fn as_uuid128(&self) -> Option<u128> {
        match self {
            Self::Uuid(bytes) => uuid::expand(bytes),
            _ => None,
        }
    }

    /// Depth-first, pre-order walk over this element and all descendants
    #[must_use]
    pub fn iter(&self) -> Walk<'_, 'a> {
        let mut stack = Vec::new();
        stack.push(self);
        Walk { stack }
    }
}

/// Pre-order iterator over a data element tree
#[derive(Debug, Clone)]
pub struct Walk<'t, 'a> {
    stack: Vec<&'t DataElement<'a>>,
}

impl<'t, 'a> Iterator for Walk<'t, 'a> {
    type Item = &'t DataElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children().iter().rev());
        Some(element)
    }
}

impl<'t, 'a> IntoIterator for &'t DataElement<'a> {
    type Item = &'t DataElement<'a>;
    type IntoIter = Walk<'t, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
