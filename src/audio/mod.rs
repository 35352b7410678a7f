// Audio hardware core
//
// Data flows one way: enumeration -> descriptor -> property store -> OS.
// Nothing here holds state between calls; the OS registry is the only source
// of truth.

pub mod devices;
pub mod error;
pub mod properties;
pub mod types;

#[cfg(target_os = "macos")]
pub mod coreaudio;

pub use devices::{AggregateDeviceManager, DefaultDeviceSelector, DeviceEnumerator};
pub use error::{AudioDevicesError, Result};
pub use properties::{AggregateDescription, AudioObjectId, PropertyAddress, PropertyStore};
pub use types::{AggregateSpec, Device, DeviceRole, Direction, TransportType};

/// Property store backed by the running system's audio hardware
#[cfg(target_os = "macos")]
pub fn system_store() -> Result<Box<dyn PropertyStore>> {
    Ok(Box::new(coreaudio::CoreAudioHardware::new()))
}

#[cfg(not(target_os = "macos"))]
pub fn system_store() -> Result<Box<dyn PropertyStore>> {
    Err(AudioDevicesError::UnsupportedPlatform)
}
