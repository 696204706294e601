//! SDP Attribute Processing
//!
//! This module interprets decoded data elements as SDP attribute lists,
//! provides the universal attribute IDs and filters attributes by ID.
//!
//! On the wire an attribute list is a data element sequence whose children
//! alternate between a 16-bit unsigned attribute ID and the attribute value.

use super::{
    AttributeId, DataElement, DataElementError, DataElementParser, DataElementType,
    ServiceRecordHandle,
};
use crate::constants::{MAX_FILTER_IDS, MAX_FILTER_RANGES};
use alloc::vec::Vec;
use thiserror::Error;

/// Universal SDP Attribute IDs
///
/// These are standardized attribute IDs defined by the Bluetooth SIG.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum UniversalAttributeId {
    /// Service Record Handle
    ServiceRecordHandle = 0x0000,
    /// Service Class ID List
    ServiceClassIdList = 0x0001,
    /// Service Record State
    ServiceRecordState = 0x0002,
    /// Service ID
    ServiceId = 0x0003,
    /// Protocol Descriptor List
    ProtocolDescriptorList = 0x0004,
    /// Browse Group List
    BrowseGroupList = 0x0005,
    /// Language Based Attribute ID List
    LanguageBaseAttributeIdList = 0x0006,
    /// Service Info Time To Live
    ServiceInfoTimeToLive = 0x0007,
    /// Service Availability
    ServiceAvailability = 0x0008,
    /// Bluetooth Profile Descriptor List
    BluetoothProfileDescriptorList = 0x0009,
    /// Documentation URL
    DocumentationUrl = 0x000A,
    /// Client Executable URL
    ClientExecutableUrl = 0x000B,
    /// Icon URL
    IconUrl = 0x000C,
    /// Additional Protocol Descriptor Lists
    AdditionalProtocolDescriptorLists = 0x000D,
}

/// Language-Based Attribute IDs
///
/// These IDs are offsets added to the language base ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum LanguageAttributeOffset {
    /// Service Name
    ServiceName = 0x0000,
    /// Service Description
    ServiceDescription = 0x0001,
    /// Provider Name
    ProviderName = 0x0002,
}

/// Standard Language Base ID for English
pub const ENGLISH_LANGUAGE_BASE_ID: u16 = 0x0100;

/// Errors produced while interpreting attribute lists
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The underlying data element could not be decoded
    #[error("malformed data element: {0}")]
    Element(#[from] DataElementError),
    /// Attribute list is not a data element sequence
    #[error("attribute list must be a sequence, found {0:?}")]
    NotASequence(DataElementType),
    /// Attribute ID is not a 16-bit unsigned integer
    #[error("attribute ID must be a 16-bit unsigned integer")]
    InvalidAttributeId,
    /// Attribute ID is not followed by a value
    #[error("attribute {0:#06x} has no value")]
    MissingAttributeValue(u16),
    /// Filter has no room for another range or ID
    #[error("attribute filter is full")]
    FilterFull,
}

/// Attribute Range for filtering
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRange {
    /// Start attribute ID (inclusive)
    pub start: u16,
    /// End attribute ID (inclusive)
    pub end: u16,
}

/// Attribute List Entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry<'a> {
    /// Attribute ID
    pub id: AttributeId,
    /// Attribute value
    pub value: DataElement<'a>,
}

/// Decoded SDP attribute list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeList<'a> {
    entries: Vec<AttributeEntry<'a>>,
}

/// Attribute Filter
///
/// Filters attributes based on ID ranges and specific IDs. An empty filter
/// passes everything. A filter can also be read from an attribute ID list
/// element, the sequence of 16-bit IDs and 32-bit ranges that SDP requests
/// carry.
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    /// Allowed attribute ranges
    ranges: heapless::Vec<AttributeRange, MAX_FILTER_RANGES>,
    /// Specific attribute IDs
    ids: heapless::Vec<u16, MAX_FILTER_IDS>,
}

impl UniversalAttributeId {
    /// Convert to u16 value
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Create from u16 value
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0000 => Some(Self::ServiceRecordHandle),
            0x0001 => Some(Self::ServiceClassIdList),
            0x0002 => Some(Self::ServiceRecordState),
            0x0003 => Some(Self::ServiceId),
            0x0004 => Some(Self::ProtocolDescriptorList),
            0x0005 => Some(Self::BrowseGroupList),
            0x0006 => Some(Self::LanguageBaseAttributeIdList),
            0x0007 => Some(Self::ServiceInfoTimeToLive),
            0x0008 => Some(Self::ServiceAvailability),
            0x0009 => Some(Self::BluetoothProfileDescriptorList),
            0x000A => Some(Self::DocumentationUrl),
            0x000B => Some(Self::ClientExecutableUrl),
            0x000C => Some(Self::IconUrl),
            0x000D => Some(Self::AdditionalProtocolDescriptorLists),
            _ => None,
        }
    }

    /// Check if attribute is mandatory for all service records
    #[must_use]
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Self::ServiceRecordHandle | Self::ServiceClassIdList)
    }
}

impl AttributeRange {
    /// Create new attribute range
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Check if attribute ID is in range
    #[must_use]
    pub const fn contains(&self, id: u16) -> bool {
        id >= self.start && id <= self.end
    }

    /// Split a 32-bit range element: start in the high half, end in the low
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(value: u32) -> Self {
        Self::new((value >> 16) as u16, value as u16)
    }

    /// Get range size
    #[must_use]
    pub const fn size(&self) -> u32 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as u32 + 1
        }
    }
}

impl<'a> AttributeEntry<'a> {
    /// Create new attribute entry
    #[must_use]
    pub const fn new(id: AttributeId, value: DataElement<'a>) -> Self {
        Self { id, value }
    }

    /// Get attribute size in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        3 + self.value.encoded_size() // ID element (header + u16) + value
    }

    /// Check if this is a universal attribute
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        UniversalAttributeId::from_u16(self.id).is_some()
    }

    /// Check if this is a language-based attribute
    #[must_use]
    pub const fn is_language_based(&self) -> bool {
        self.id >= ENGLISH_LANGUAGE_BASE_ID && self.id < (ENGLISH_LANGUAGE_BASE_ID + 0x100)
    }
}

impl<'a> AttributeList<'a> {
    /// Interpret a decoded sequence as an attribute list
    ///
    /// # Errors
    /// Returns `NotASequence` if the element is not a sequence,
    /// `InvalidAttributeId` if an ID slot holds anything but a 16-bit unsigned
    /// integer, and `MissingAttributeValue` for a trailing ID
    pub fn from_element(element: DataElement<'a>) -> Result<Self, AttributeError> {
        let kind = element.data_type();
        let DataElement::Sequence(list) = element else {
            return Err(AttributeError::NotASequence(kind));
        };

        let mut children = list.into_vec().into_iter();
        let mut entries = Vec::with_capacity(children.len() / 2);
        while let Some(id_element) = children.next() {
            let id = id_element
                .as_u16()
                .ok_or(AttributeError::InvalidAttributeId)?;
            let value = children
                .next()
                .ok_or(AttributeError::MissingAttributeValue(id))?;
            entries.push(AttributeEntry::new(id, value));
        }

        Ok(Self { entries })
    }

    /// Decode an attribute list that spans all of `data`
    ///
    /// # Errors
    /// Returns `Element` for malformed data elements, otherwise see
    /// [`AttributeList::from_element`]
    pub fn parse(data: &'a [u8], parser: &DataElementParser) -> Result<Self, AttributeError> {
        let element = parser.parse_exact(data)?;
        Self::from_element(element)
    }

    /// Get attribute value
    #[must_use]
    pub fn get(&self, id: AttributeId) -> Option<&DataElement<'a>> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.value)
    }

    /// Get a universal attribute value
    #[must_use]
    pub fn get_universal(&self, id: UniversalAttributeId) -> Option<&DataElement<'a>> {
        self.get(id.to_u16())
    }

    /// Service record handle, if present as a 32-bit unsigned integer
    #[must_use]
    pub fn record_handle(&self) -> Option<ServiceRecordHandle> {
        self.get_universal(UniversalAttributeId::ServiceRecordHandle)
            .and_then(DataElement::as_u32)
    }

    /// Entries in wire order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeEntry<'a>> {
        self.entries.iter()
    }

    /// Entries whose ID passes the filter
    pub fn filtered<'f>(
        &'f self,
        filter: &'f AttributeFilter,
    ) -> impl Iterator<Item = &'f AttributeEntry<'a>> {
        self.entries
            .iter()
            .filter(move |entry| filter.matches(entry.id))
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list holds no attributes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take ownership of the entries
    #[must_use]
    pub fn into_entries(self) -> Vec<AttributeEntry<'a>> {
        self.entries
    }
}

/// Decode a sequence of attribute lists, one per service record
///
/// # Errors
/// Returns the first error found in the outer sequence or any attribute list
pub fn parse_attribute_lists<'a>(
    data: &'a [u8],
    parser: &DataElementParser,
) -> Result<Vec<AttributeList<'a>>, AttributeError> {
    let element = parser.parse_exact(data)?;
    let kind = element.data_type();
    let DataElement::Sequence(lists) = element else {
        return Err(AttributeError::NotASequence(kind));
    };

    lists
        .into_vec()
        .into_iter()
        .map(AttributeList::from_element)
        .collect()
}

impl AttributeFilter {
    /// Create new empty filter
    #[must_use]
    pub fn new() -> Self {
        Self {
            ranges: heapless::Vec::new(),
            ids: heapless::Vec::new(),
        }
    }

    /// Build a filter from a decoded attribute ID list
    ///
    /// Each child must be a 16-bit unsigned integer (a single ID) or a 32-bit
    /// unsigned integer (a range).
    ///
    /// # Errors
    /// Returns `NotASequence` if the element is not a sequence,
    /// `InvalidAttributeId` for any other child, and `FilterFull` if the list
    /// holds more IDs or ranges than the filter can keep
    pub fn from_element(element: &DataElement<'_>) -> Result<Self, AttributeError> {
        let DataElement::Sequence(items) = element else {
            return Err(AttributeError::NotASequence(element.data_type()));
        };

        let mut filter = Self::new();
        for item in items.iter() {
            match *item {
                DataElement::UnsignedInt16(id) => filter.add_id(id)?,
                DataElement::UnsignedInt32(range) => {
                    filter.add_range(AttributeRange::from_u32(range))?;
                }
                _ => return Err(AttributeError::InvalidAttributeId),
            }
        }

        debug!(
            "[SDP] Attribute filter with {} IDs and {} ranges",
            filter.id_count(),
            filter.range_count()
        );
        Ok(filter)
    }

    /// Decode an attribute ID list that spans all of `data` into a filter
    ///
    /// # Errors
    /// Returns `Element` for malformed data elements, otherwise see
    /// [`AttributeFilter::from_element`]
    pub fn parse(data: &[u8], parser: &DataElementParser) -> Result<Self, AttributeError> {
        let element = parser.parse_exact(data)?;
        Self::from_element(&element)
    }

    /// Add attribute range to filter
    ///
    /// # Errors
    /// Returns error if too many ranges are added
    pub fn add_range(&mut self, range: AttributeRange) -> Result<(), AttributeError> {
        self.ranges
            .push(range)
            .map_err(|_| AttributeError::FilterFull)
    }

    /// Add specific attribute ID to filter
    ///
    /// # Errors
    /// Returns error if too many IDs are added
    pub fn add_id(&mut self, id: u16) -> Result<(), AttributeError> {
        self.ids.push(id).map_err(|_| AttributeError::FilterFull)
    }

    /// Check if attribute ID passes filter
    #[must_use]
    pub fn matches(&self, id: u16) -> bool {
        // If no filters set, allow all
        if self.ranges.is_empty() && self.ids.is_empty() {
            return true;
        }

        self.ids.contains(&id) || self.ranges.iter().any(|range| range.contains(id))
    }

    /// Clear all filters
    pub fn clear(&mut self) {
        self.ranges.clear();
        self.ids.clear();
    }

    /// Get number of ranges
    #[must_use]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Get number of specific IDs
    #[must_use]
    pub fn id_count(&self) -> usize {
        self.ids.len()
    }
}

impl Default for AttributeFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Create language-based attribute ID
///
/// Returns `None` if `base_id + offset` does not fit in 16 bits.
#[must_use]
pub const fn language_attribute_id(base_id: u16, offset: LanguageAttributeOffset) -> Option<u16> {
    base_id.checked_add(offset as u16)
}

/// Get English service name attribute ID
#[must_use]
pub const fn english_service_name_id() -> u16 {
    ENGLISH_LANGUAGE_BASE_ID + LanguageAttributeOffset::ServiceName as u16
}

/// Get English service description attribute ID
#[must_use]
pub const fn english_service_description_id() -> u16 {
    ENGLISH_LANGUAGE_BASE_ID + LanguageAttributeOffset::ServiceDescription as u16
}

/// Get English provider name attribute ID
#[must_use]
pub const fn english_provider_name_id() -> u16 {
    ENGLISH_LANGUAGE_BASE_ID + LanguageAttributeOffset::ProviderName as u16
}
