use serde::{Deserialize, Serialize};
use std::fmt;

use super::properties::{fourcc, selectors, AudioObjectId, Scope};

/// Point-in-time snapshot of one audio device.
///
/// Nothing caches these: every query re-reads the OS. Optional fields are
/// `None` when the device does not expose the control in that direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: AudioObjectId,
    pub name: String,
    pub uid: String,
    pub is_input: bool,
    pub is_output: bool,
    pub input_volume: Option<f64>,
    pub output_volume: Option<f64>,
    pub input_muted: Option<bool>,
    pub output_muted: Option<bool>,
    pub transport_type: TransportType,
}

impl Device {
    pub fn volume(&self, direction: Direction) -> Option<f64> {
        match direction {
            Direction::Input => self.input_volume,
            Direction::Output => self.output_volume,
        }
    }

    pub fn muted(&self, direction: Direction) -> Option<bool> {
        match direction {
            Direction::Input => self.input_muted,
            Direction::Output => self.output_muted,
        }
    }

    pub fn supports(&self, direction: Direction) -> bool {
        match direction {
            Direction::Input => self.is_input,
            Direction::Output => self.is_output,
        }
    }
}

/// Stream direction of a per-device control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    #[default]
    Output,
}

impl Direction {
    pub fn scope(self) -> Scope {
        match self {
            Direction::Input => Scope::Input,
            Direction::Output => Scope::Output,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Input => "input",
            Direction::Output => "output",
        })
    }
}

/// System-wide default device roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    Input,
    Output,
    /// Default device for alerts and sound effects
    System,
}

impl DeviceRole {
    /// Hardware selector holding this role's default device id
    pub fn selector(self) -> u32 {
        match self {
            DeviceRole::Input => selectors::DEFAULT_INPUT_DEVICE,
            DeviceRole::Output => selectors::DEFAULT_OUTPUT_DEVICE,
            DeviceRole::System => selectors::DEFAULT_SYSTEM_OUTPUT_DEVICE,
        }
    }

    /// Capability a device needs before it can take this role
    pub fn required_direction(self) -> Direction {
        match self {
            DeviceRole::Input => Direction::Input,
            DeviceRole::Output | DeviceRole::System => Direction::Output,
        }
    }

    pub fn accepts(self, device: &Device) -> bool {
        device.supports(self.required_direction())
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceRole::Input => "input",
            DeviceRole::Output => "output",
            DeviceRole::System => "system",
        })
    }
}

/// Physical or virtual connection category of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportType {
    Avb,
    Aggregate,
    #[serde(rename = "airplay")]
    AirPlay,
    #[serde(rename = "autoaggregate")]
    AutoAggregate,
    Bluetooth,
    #[serde(rename = "bluetoothLE")]
    BluetoothLe,
    #[serde(rename = "builtin")]
    BuiltIn,
    #[serde(rename = "displayport")]
    DisplayPort,
    #[serde(rename = "firewire")]
    FireWire,
    Hdmi,
    Pci,
    Thunderbolt,
    Usb,
    Virtual,
    #[default]
    Unknown,
}

/// Raw `kAudioDeviceTransportType*` codes. Anything not listed maps to `Unknown`.
const TRANSPORT_CODES: [(u32, TransportType); 14] = [
    (fourcc(b"eavb"), TransportType::Avb),
    (fourcc(b"grup"), TransportType::Aggregate),
    (fourcc(b"airp"), TransportType::AirPlay),
    (fourcc(b"fgrp"), TransportType::AutoAggregate),
    (fourcc(b"blue"), TransportType::Bluetooth),
    (fourcc(b"blea"), TransportType::BluetoothLe),
    (fourcc(b"bltn"), TransportType::BuiltIn),
    (fourcc(b"dprt"), TransportType::DisplayPort),
    (fourcc(b"1394"), TransportType::FireWire),
    (fourcc(b"hdmi"), TransportType::Hdmi),
    (fourcc(b"pci "), TransportType::Pci),
    (fourcc(b"thun"), TransportType::Thunderbolt),
    (fourcc(b"usb "), TransportType::Usb),
    (fourcc(b"virt"), TransportType::Virtual),
];

impl TransportType {
    pub fn from_code(code: u32) -> Self {
        TRANSPORT_CODES
            .iter()
            .find(|(raw, _)| *raw == code)
            .map(|(_, transport)| *transport)
            .unwrap_or(TransportType::Unknown)
    }

    /// Raw code for this transport; `Unknown` is `kAudioDeviceTransportTypeUnknown` (0)
    pub fn code(self) -> u32 {
        TRANSPORT_CODES
            .iter()
            .find(|(_, transport)| *transport == self)
            .map(|(raw, _)| *raw)
            .unwrap_or(0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Avb => "avb",
            TransportType::Aggregate => "aggregate",
            TransportType::AirPlay => "airplay",
            TransportType::AutoAggregate => "autoaggregate",
            TransportType::Bluetooth => "bluetooth",
            TransportType::BluetoothLe => "bluetoothLE",
            TransportType::BuiltIn => "builtin",
            TransportType::DisplayPort => "displayport",
            TransportType::FireWire => "firewire",
            TransportType::Hdmi => "hdmi",
            TransportType::Pci => "pci",
            TransportType::Thunderbolt => "thunderbolt",
            TransportType::Usb => "usb",
            TransportType::Virtual => "virtual",
            TransportType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-only request for a new aggregate device
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSpec {
    pub name: String,
    pub uid: String,
    pub main_device: Device,
    pub other_devices: Vec<Device>,
    /// Multi-output device (output fan-out) instead of a full aggregate
    pub stacked: bool,
}

impl AggregateSpec {
    /// New non-stacked spec with a freshly generated uid
    pub fn new(name: impl Into<String>, main_device: Device, other_devices: Vec<Device>) -> Self {
        Self {
            name: name.into(),
            uid: uuid::Uuid::new_v4().to_string().to_uppercase(),
            main_device,
            other_devices,
            stacked: false,
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }
}
