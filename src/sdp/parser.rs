//! SDP Data Element Parser
//!
//! Recursive decoding of data elements received from a remote peer. The input
//! is untrusted, so every read goes through a bounded [`Cursor`] and nesting is
//! limited by an explicit depth counter rather than the call stack.

use super::element::{DataElement, ElementList, Payload};
use super::header::{DataElementHeader, DataElementType};
use super::{Cursor, DataElementError};
use crate::constants::DEFAULT_MAX_DEPTH;
use alloc::vec::Vec;

/// Handling of boolean payload bytes other than 0 and 1
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanPolicy {
    /// Reject with [`DataElementError::InvalidBooleanValue`]
    #[default]
    Strict,
    /// Treat any nonzero byte as `true`
    Lenient,
}

/// Options for configuring a [`DataElementParser`]
///
/// These are chosen by the integrator. Nothing in the received data can
/// change them.
///
/// # Examples
///
/// ```rust
/// use sdp_elements::{BooleanPolicy, DataElementParser, DataElementParserOptions};
///
/// let parser = DataElementParser::with_options(DataElementParserOptions {
///     max_depth: 4,
///     boolean_policy: BooleanPolicy::Lenient,
/// });
/// let (element, consumed) = parser.parse(&[0x28, 0x02]).unwrap();
/// assert_eq!(element.as_bool(), Some(true));
/// assert_eq!(consumed, 2);
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataElementParserOptions {
    /// Number of nested sequences/alternatives accepted
    ///
    /// A chain of exactly `max_depth` nested composites decodes; one more
    /// fails with [`DataElementError::MaxDepthExceeded`].
    pub max_depth: usize,
    /// Handling of out-of-range boolean bytes
    pub boolean_policy: BooleanPolicy,
}

impl Default for DataElementParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            boolean_policy: BooleanPolicy::Strict,
        }
    }
}

/// SDP data element parser
///
/// Holds only configuration. Each call works on its own cursor, so one parser
/// can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataElementParser {
    options: DataElementParserOptions,
}

impl DataElementParser {
    /// Create a parser with default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DataElementParserOptions::default())
    }

    /// Create a parser with custom options
    #[must_use]
    pub const fn with_options(options: DataElementParserOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the options
    #[must_use]
    pub const fn options(&self) -> &DataElementParserOptions {
        &self.options
    }

    /// Decode one data element from the start of `data`
    ///
    /// Returns the element and the number of bytes it occupied. Bytes after
    /// the element are left alone.
    ///
    /// # Errors
    /// Returns the first [`DataElementError`] hit anywhere in the tree
    pub fn parse<'a>(&self, data: &'a [u8]) -> Result<(DataElement<'a>, usize), DataElementError> {
        let mut cursor = Cursor::new(data);
        let element = self.parse_from(&mut cursor)?;
        Ok((element, cursor.position()))
    }

    /// Decode one data element that must span all of `data`
    ///
    /// # Errors
    /// Returns `TrailingBytes` if anything follows the element, or the first
    /// decoding error
    pub fn parse_exact<'a>(&self, data: &'a [u8]) -> Result<DataElement<'a>, DataElementError> {
        let (element, consumed) = self.parse(data)?;
        if consumed != data.len() {
            debug!(
                "[SDP] {} trailing bytes after data element",
                data.len() - consumed
            );
            return Err(DataElementError::TrailingBytes(data.len() - consumed));
        }
        Ok(element)
    }

    /// Decode back-to-back data elements until `data` is exhausted
    ///
    /// # Errors
    /// Returns the first decoding error; nothing decoded before it is returned
    pub fn parse_all<'a>(&self, data: &'a [u8]) -> Result<Vec<DataElement<'a>>, DataElementError> {
        let mut cursor = Cursor::new(data);
        let mut elements = Vec::new();
        while !cursor.is_empty() {
            elements.push(self.parse_from(&mut cursor)?);
        }
        Ok(elements)
    }

    /// Decode one data element at the cursor position
    ///
    /// On error the cursor position is unspecified; the caller is expected to
    /// discard it.
    ///
    /// # Errors
    /// Returns the first [`DataElementError`] hit anywhere in the tree
    pub fn parse_from<'a>(
        &self,
        cursor: &mut Cursor<'a>,
    ) -> Result<DataElement<'a>, DataElementError> {
        self.parse_element(cursor, 0).inspect_err(|error| {
            debug!("[SDP] Rejected data element: {}", error);
        })
    }

    fn parse_element<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        depth: usize,
    ) -> Result<DataElement<'a>, DataElementError> {
        let header = DataElementHeader::decode(cursor)?;
        let length = header.declared_length;

        match header.kind {
            DataElementType::Nil => Ok(DataElement::Nil),
            DataElementType::UnsignedInt => parse_unsigned(cursor.take_bytes(length)?),
            DataElementType::SignedInt => parse_signed(cursor.take_bytes(length)?),
            DataElementType::Uuid => Ok(DataElement::Uuid(cursor.take_bytes(length)?)),
            DataElementType::Boolean => self.parse_boolean(cursor.take_byte()?),
            DataElementType::TextString => Ok(DataElement::TextString(Payload::new(
                cursor.take_bytes(length)?,
                header.size,
            ))),
            DataElementType::Url => Ok(DataElement::Url(Payload::new(
                cursor.take_bytes(length)?,
                header.size,
            ))),
            DataElementType::Sequence => Ok(DataElement::Sequence(
                self.parse_list(cursor, &header, depth)?,
            )),
            DataElementType::Alternative => Ok(DataElement::Alternative(
                self.parse_list(cursor, &header, depth)?,
            )),
        }
    }

    fn parse_list<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        header: &DataElementHeader,
        depth: usize,
    ) -> Result<ElementList<'a>, DataElementError> {
        let mut content = cursor.sub_cursor(header.declared_length)?;

        if depth >= self.options.max_depth {
            warn!(
                "[SDP] Data element nesting exceeds max depth {}",
                self.options.max_depth
            );
            return Err(DataElementError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        let mut elements = Vec::new();
        while !content.is_empty() {
            elements.push(self.parse_element(&mut content, depth + 1)?);
        }

        trace!(
            "[SDP] {} with {} children at depth {}",
            header.kind,
            elements.len(),
            depth
        );
        Ok(ElementList::new(
            elements,
            header.size,
            header.declared_length,
        ))
    }

    fn parse_boolean<'a>(&self, value: u8) -> Result<DataElement<'a>, DataElementError> {
        match (value, self.options.boolean_policy) {
            (0, _) => Ok(DataElement::Boolean(false)),
            (1, _) | (_, BooleanPolicy::Lenient) => Ok(DataElement::Boolean(true)),
            (_, BooleanPolicy::Strict) => Err(DataElementError::InvalidBooleanValue(value)),
        }
    }
}

/// Decode one data element with default options
///
/// # Errors
/// See [`DataElementParser::parse`]
pub fn parse_data_element(data: &[u8]) -> Result<(DataElement<'_>, usize), DataElementError> {
    DataElementParser::new().parse(data)
}

fn parse_unsigned(bytes: &[u8]) -> Result<DataElement<'_>, DataElementError> {
    Ok(match bytes.len() {
        1 => DataElement::UnsignedInt8(bytes[0]),
        2 => DataElement::UnsignedInt16(u16::from_be_bytes(be_array(bytes)?)),
        4 => DataElement::UnsignedInt32(u32::from_be_bytes(be_array(bytes)?)),
        8 => DataElement::UnsignedInt64(u64::from_be_bytes(be_array(bytes)?)),
        _ => DataElement::UnsignedInt128(u128::from_be_bytes(be_array(bytes)?)),
    })
}

fn parse_signed(bytes: &[u8]) -> Result<DataElement<'_>, DataElementError> {
    Ok(match bytes.len() {
        1 => DataElement::SignedInt8(i8::from_be_bytes([bytes[0]])),
        2 => DataElement::SignedInt16(i16::from_be_bytes(be_array(bytes)?)),
        4 => DataElement::SignedInt32(i32::from_be_bytes(be_array(bytes)?)),
        8 => DataElement::SignedInt64(i64::from_be_bytes(be_array(bytes)?)),
        _ => DataElement::SignedInt128(i128::from_be_bytes(be_array(bytes)?)),
    })
}

fn be_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DataElementError> {
    bytes
        .try_into()
        .map_err(|_| DataElementError::TruncatedInput {
            needed: N,
            remaining: bytes.len(),
        })
}
