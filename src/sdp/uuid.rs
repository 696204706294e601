//! SDP UUID Interpretation
//!
//! UUID payloads are kept as raw bytes in the tree. This module expands the
//! 16- and 32-bit short forms into full 128-bit values.

/// Bluetooth Base UUID: 00000000-0000-1000-8000-00805F9B34FB
pub const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5F9B_34FB;

/// Service UUID type (128-bit)
pub type ServiceUuid = u128;

/// Expand a raw UUID payload to 128 bits
///
/// 2- and 4-byte payloads are placed in the top 32 bits of the Base UUID,
/// 16-byte payloads are read as-is. Any other width is not a UUID.
#[must_use]
pub fn expand(bytes: &[u8]) -> Option<ServiceUuid> {
    match *bytes {
        [a, b] => Some(from_u32(u32::from(u16::from_be_bytes([a, b])))),
        [a, b, c, d] => Some(from_u32(u32::from_be_bytes([a, b, c, d]))),
        _ => {
            let full: [u8; 16] = bytes.try_into().ok()?;
            Some(u128::from_be_bytes(full))
        }
    }
}

/// Build a 128-bit UUID from a 16- or 32-bit short form
#[must_use]
pub const fn from_u32(short: u32) -> ServiceUuid {
    BLUETOOTH_BASE_UUID | ((short as u128) << 96)
}

/// Recover the 32-bit short form if the UUID is derived from the Base UUID
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn to_u32(uuid: ServiceUuid) -> Option<u32> {
    if uuid & 0x0000_0000_FFFF_FFFF_FFFF_FFFF_FFFF_FFFF == BLUETOOTH_BASE_UUID {
        Some((uuid >> 96) as u32)
    } else {
        None
    }
}

/// Standard Bluetooth Service Classes
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ServiceClassId {
    /// SDP Server Service
    ServiceDiscoveryServer = 0x1000,
    /// Browse Group Descriptor
    BrowseGroupDescriptor = 0x1001,
    /// Public Browse Root
    PublicBrowseRoot = 0x1002,
    /// Serial Port Profile
    SerialPort = 0x1101,
    /// LAN Access Using PPP
    LanAccessPpp = 0x1102,
    /// Dialup Networking
    DialupNetworking = 0x1103,
    /// Object Push Profile
    ObjectPush = 0x1105,
    /// File Transfer Profile
    FileTransfer = 0x1106,
    /// Headset Profile
    Headset = 0x1108,
    /// Audio Source
    AudioSource = 0x110A,
    /// Audio Sink
    AudioSink = 0x110B,
    /// A/V Remote Control Target
    AvRemoteControlTarget = 0x110C,
    /// Advanced Audio Distribution Profile
    AdvancedAudioDistribution = 0x110D,
    /// A/V Remote Control
    AvRemoteControl = 0x110E,
    /// Hands-Free Profile
    HandsFree = 0x111E,
    /// Hands-Free Audio Gateway
    HandsFreeAudioGateway = 0x111F,
    /// Human Interface Device
    HumanInterfaceDevice = 0x1124,
    /// PnP Information
    PnpInformation = 0x1200,
}

impl ServiceClassId {
    /// Convert to 128-bit UUID
    #[must_use]
    pub const fn to_uuid(self) -> ServiceUuid {
        from_u32(self as u32)
    }

    /// Look up a well-known service class by UUID
    #[must_use]
    pub const fn from_uuid(uuid: ServiceUuid) -> Option<Self> {
        match to_u32(uuid) {
            Some(short) => Self::from_u32(short),
            None => None,
        }
    }

    const fn from_u32(short: u32) -> Option<Self> {
        match short {
            0x1000 => Some(Self::ServiceDiscoveryServer),
            0x1001 => Some(Self::BrowseGroupDescriptor),
            0x1002 => Some(Self::PublicBrowseRoot),
            0x1101 => Some(Self::SerialPort),
            0x1102 => Some(Self::LanAccessPpp),
            0x1103 => Some(Self::DialupNetworking),
            0x1105 => Some(Self::ObjectPush),
            0x1106 => Some(Self::FileTransfer),
            0x1108 => Some(Self::Headset),
            0x110A => Some(Self::AudioSource),
            0x110B => Some(Self::AudioSink),
            0x110C => Some(Self::AvRemoteControlTarget),
            0x110D => Some(Self::AdvancedAudioDistribution),
            0x110E => Some(Self::AvRemoteControl),
            0x111E => Some(Self::HandsFree),
            0x111F => Some(Self::HandsFreeAudioGateway),
            0x1124 => Some(Self::HumanInterfaceDevice),
            0x1200 => Some(Self::PnpInformation),
            _ => None,
        }
    }

    /// Get service name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ServiceDiscoveryServer => "Service Discovery Server",
            Self::BrowseGroupDescriptor => "Browse Group Descriptor",
            Self::PublicBrowseRoot => "Public Browse Root",
            Self::SerialPort => "Serial Port",
            Self::LanAccessPpp => "LAN Access Using PPP",
            Self::DialupNetworking => "Dialup Networking",
            Self::ObjectPush => "Object Push",
            Self::FileTransfer => "File Transfer",
            Self::Headset => "Headset",
            Self::AudioSource => "Audio Source",
            Self::AudioSink => "Audio Sink",
            Self::AvRemoteControlTarget => "A/V Remote Control Target",
            Self::AdvancedAudioDistribution => "Advanced Audio Distribution",
            Self::AvRemoteControl => "A/V Remote Control",
            Self::HandsFree => "Hands-Free",
            Self::HandsFreeAudioGateway => "Hands-Free Audio Gateway",
            Self::HumanInterfaceDevice => "Human Interface Device",
            Self::PnpInformation => "PnP Information",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_class_uuid_conversion() {
        let audio_source = ServiceClassId::AudioSource;
        let uuid = audio_source.to_uuid();

        // Full UUID should be: 0000110A-0000-1000-8000-00805F9B34FB
        assert_eq!(uuid, 0x0000_110A_0000_1000_8000_0080_5F9B_34FB);
        assert_eq!(ServiceClassId::from_uuid(uuid), Some(audio_source));
        assert_eq!(audio_source.name(), "Audio Source");
    }

    #[test]
    fn test_expand_short_forms() {
        assert_eq!(
            expand(&[0x11, 0x0B]),
            Some(ServiceClassId::AudioSink.to_uuid())
        );
        assert_eq!(
            expand(&[0x00, 0x00, 0x11, 0x0B]),
            Some(ServiceClassId::AudioSink.to_uuid())
        );
    }

    #[test]
    fn test_expand_full_uuid() {
        let bytes = [
            0x00, 0x00, 0x11, 0x01, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0x80, 0x5F, 0x9B,
            0x34, 0xFB,
        ];
        assert_eq!(expand(&bytes), Some(ServiceClassId::SerialPort.to_uuid()));
    }

    #[test]
    fn test_expand_rejects_other_widths() {
        assert_eq!(expand(&[0x01]), None);
        assert_eq!(expand(&[0u8; 8]), None);
        assert_eq!(expand(&[]), None);
    }

    #[test]
    fn test_vendor_uuid_has_no_short_form() {
        let vendor = 0x1234_5678_9ABC_DEF0_1234_5678_9ABC_DEF0;
        assert_eq!(to_u32(vendor), None);
        assert_eq!(ServiceClassId::from_uuid(vendor), None);
    }
}
