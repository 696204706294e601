#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod constants;
pub mod sdp;

pub use sdp::{
    AttributeEntry, AttributeError, AttributeFilter, AttributeList, AttributeRange,
    BooleanPolicy, Cursor, DataElement, DataElementError, DataElementHeader, DataElementParser,
    DataElementParserOptions, DataElementSize, DataElementType, ServiceClassId,
    UniversalAttributeId, parse_attribute_lists, parse_data_element,
};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Response payload of a service search attribute request for an A2DP sink
    const AUDIO_SINK_RECORD: [u8; 40] = [
        0x35, 0x26, // attribute list
        0x09, 0x00, 0x01, 0x35, 0x03, 0x19, 0x11, 0x0B, // service class ID list
        0x09, 0x00, 0x04, 0x35, 0x10, // protocol descriptor list
        0x35, 0x06, 0x19, 0x01, 0x00, 0x09, 0x00, 0x19, // L2CAP, PSM 0x0019
        0x35, 0x06, 0x19, 0x00, 0x19, 0x09, 0x01, 0x03, // AVDTP 1.3
        0x09, 0x01, 0x00, 0x25, 0x04, b'S', b'i', b'n', b'k', // service name
    ];

    #[test]
    fn test_decode_audio_sink_record() {
        let parser = DataElementParser::new();
        let list = AttributeList::parse(&AUDIO_SINK_RECORD, &parser).unwrap();

        let class = list
            .get_universal(UniversalAttributeId::ServiceClassIdList)
            .and_then(|classes| classes.children().first())
            .and_then(DataElement::as_uuid128)
            .and_then(ServiceClassId::from_uuid);
        assert_eq!(class, Some(ServiceClassId::AudioSink));

        let protocols = list
            .get_universal(UniversalAttributeId::ProtocolDescriptorList)
            .unwrap();
        let psm = protocols.children()[0].children()[1].as_u16();
        assert_eq!(psm, Some(0x0019));

        let uuids: Vec<u128> = protocols
            .iter()
            .filter_map(DataElement::as_uuid128)
            .collect();
        assert_eq!(uuids.len(), 2);

        assert_eq!(list.get(0x0100).and_then(DataElement::as_str), Some("Sink"));
    }

    #[test]
    fn test_corrupt_record_is_rejected_whole() {
        let mut corrupt = AUDIO_SINK_RECORD;
        // Protocol descriptor list swallows the first byte of the next attribute ID
        corrupt[14] = 0x11;
        assert!(matches!(
            AttributeList::parse(&corrupt, &DataElementParser::new()),
            Err(AttributeError::Element(DataElementError::TruncatedInput { .. }))
        ));
    }
}
