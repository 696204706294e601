//! Service Discovery Protocol (SDP) Data Elements
//!
//! This module decodes the data element encoding used for every SDP attribute
//! value, and interprets decoded trees as attribute lists.

pub mod attribute;
pub mod cursor;
pub mod element;
pub mod error;
pub mod header;
pub mod parser;
pub mod uuid;

// Re-export commonly used types
pub use attribute::{
    AttributeEntry, AttributeError, AttributeFilter, AttributeList, AttributeRange,
    UniversalAttributeId, parse_attribute_lists,
};
pub use cursor::Cursor;
pub use element::{DataElement, ElementList, Payload, Walk};
pub use error::DataElementError;
pub use header::{DataElementHeader, DataElementSize, DataElementType};
pub use parser::{
    BooleanPolicy, DataElementParser, DataElementParserOptions, parse_data_element,
};
pub use uuid::{BLUETOOTH_BASE_UUID, ServiceClassId, ServiceUuid};

/// Service record handle type
pub type ServiceRecordHandle = u32;

/// Attribute ID type
pub type AttributeId = u16;
