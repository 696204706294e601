//! SDP Data Element Errors

use super::header::DataElementType;
use thiserror::Error;

/// Errors produced while decoding SDP data elements
///
/// Any error aborts the whole decode. A malformed element invalidates the
/// offsets of everything after it, so no partial tree is ever returned.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataElementError {
    /// Fewer bytes are available than the header declares
    #[error("truncated input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes required by the read that failed
        needed: usize,
        /// Bytes that were left in the cursor
        remaining: usize,
    },
    /// Type code outside the range defined by the Bluetooth Core specification
    #[error("unknown data element type code {0}")]
    UnknownType(u8),
    /// Size descriptor is not allowed for the data element type
    #[error("size descriptor {descriptor} is invalid for {kind:?}")]
    InvalidSizeDescriptor {
        /// Type the header announced
        kind: DataElementType,
        /// Raw 3-bit size descriptor
        descriptor: u8,
    },
    /// Composite elements are nested deeper than the configured limit
    #[error("data element nesting exceeds maximum depth {max_depth}")]
    MaxDepthExceeded {
        /// Configured limit that was hit
        max_depth: usize,
    },
    /// Boolean payload is neither 0 nor 1
    #[error("invalid boolean value {0:#04x}")]
    InvalidBooleanValue(u8),
    /// Bytes left over after a data element that should span the whole buffer
    #[error("{0} trailing bytes after data element")]
    TrailingBytes(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_error_display() {
        let mut text: String<64> = String::new();
        write!(
            text,
            "{}",
            DataElementError::TruncatedInput {
                needed: 2,
                remaining: 1
            }
        )
        .unwrap();
        assert_eq!(text.as_str(), "truncated input: need 2 bytes, 1 remaining");

        text.clear();
        write!(text, "{}", DataElementError::InvalidBooleanValue(2)).unwrap();
        assert_eq!(text.as_str(), "invalid boolean value 0x02");
    }

    #[test]
    fn test_error_is_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&DataElementError::UnknownType(9));
    }
}
