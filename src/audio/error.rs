// Error taxonomy for device queries and mutations
//
// Every failure is local to the single operation that produced it: nothing is
// retried and nothing is rolled back. OS status codes are carried verbatim so
// the CLI can print them.

use super::properties::PropertyAddress;
use super::types::{DeviceRole, Direction};

/// Raw Core Audio status code (`OSStatus`).
pub type OsStatus = i32;

/// Errors that can occur while talking to the audio hardware
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioDevicesError {
    #[error("No audio device with id {id}")]
    InvalidDeviceId { id: u32 },

    #[error("Device {id} cannot be used as the default {role} device")]
    InvalidDevice { id: u32, role: DeviceRole },

    #[error("No default {role} device is configured")]
    NoDefaultDevice { role: DeviceRole },

    #[error("Device {id} does not support {direction} volume")]
    VolumeNotSupported { id: u32, direction: Direction },

    #[error("Device {id} does not support {direction} mute")]
    MuteNotSupported { id: u32, direction: Direction },

    #[error("Volume must be between 0 and 1, got {value}")]
    InvalidVolumeValue { value: f64 },

    #[error("Invalid aggregate device: {0}")]
    InvalidAggregate(String),

    #[error("Could not read {property}: {}", describe_status(*.status))]
    PropertyUnavailable {
        property: PropertyAddress,
        status: OsStatus,
    },

    #[error("Core Audio rejected {operation}: {}", describe_status(*.status))]
    PropertyRejected { operation: String, status: OsStatus },

    #[error("Core Audio is only available on macOS")]
    UnsupportedPlatform,
}

pub type Result<T> = std::result::Result<T, AudioDevicesError>;

impl AudioDevicesError {
    /// The OS status code behind this error, if it came from Core Audio
    pub fn status(&self) -> Option<OsStatus> {
        match self {
            Self::PropertyUnavailable { status, .. } | Self::PropertyRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub(crate) fn unavailable(property: PropertyAddress, status: OsStatus) -> Self {
        Self::PropertyUnavailable { property, status }
    }

    pub(crate) fn rejected(operation: impl Into<String>, status: OsStatus) -> Self {
        Self::PropertyRejected {
            operation: operation.into(),
            status,
        }
    }
}

/// Convert OSStatus error codes to human-readable messages
pub fn describe_status(status: OsStatus) -> String {
    let hint = match status {
        0 => return "no error".to_string(),
        0x7374_6F70 => "audio hardware not running",          // 'stop'
        0x7768_6174 => "unspecified audio hardware error",    // 'what'
        0x7768_6F3F => "unknown property",                    // 'who?'
        0x2173_697A => "bad property size",                   // '!siz'
        0x6E6F_7065 => "illegal operation",                   // 'nope'
        0x216F_626A => "audio object does not exist",         // '!obj'
        0x2164_6576 => "audio device does not exist",         // '!dev'
        0x2173_7472 => "audio stream does not exist",         // '!str'
        0x756E_6F70 => "unsupported operation",               // 'unop'
        0x2164_6174 => "unsupported format",                  // '!dat'
        0x2168_6F67 => "permission denied",                   // '!hog'
        -50 => "parameter error",
        -4 => "unimplemented",
        _ => return format!("OSStatus {}", status),
    };
    format!("{} (OSStatus {})", hint, status)
}
