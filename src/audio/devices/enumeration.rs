// Device discovery and enumeration
//
// Reads the hardware device list and maps every id through the descriptor
// builder. Results are recomputed on every call; ids that vanish between the
// list read and the descriptor read (hot-unplug) are dropped silently.

use tracing::debug;

use super::descriptor;
use crate::audio::error::Result;
use crate::audio::properties::{selectors, AudioObjectId, PropertyAddress, PropertyStore};
use crate::audio::types::{Device, Direction};

/// Directory of all hardware devices known to the OS
pub struct DeviceEnumerator<'a> {
    store: &'a dyn PropertyStore,
}

impl<'a> DeviceEnumerator<'a> {
    pub fn new(store: &'a dyn PropertyStore) -> Self {
        Self { store }
    }

    /// Raw ids from the system object's device list
    pub fn device_ids(&self) -> Result<Vec<AudioObjectId>> {
        self.store
            .get_object_list(&PropertyAddress::global(selectors::HARDWARE_DEVICES))
    }

    /// Every device that currently resolves to a full snapshot.
    ///
    /// An unreadable device list yields an empty result rather than an error.
    pub fn list_all(&self) -> Vec<Device> {
        let ids = match self.device_ids() {
            Ok(ids) => ids,
            Err(e) => {
                debug!("Device list unavailable: {}", e);
                return Vec::new();
            }
        };
        crate::device_debug!("Core Audio reports {} devices", ids.len());

        ids.into_iter()
            .filter_map(|id| match descriptor::build(self.store, id) {
                Ok(device) => Some(device),
                Err(e) => {
                    debug!("Dropping device {} from listing: {}", id, e);
                    None
                }
            })
            .collect()
    }

    /// Devices with at least one input stream
    pub fn input(&self) -> Vec<Device> {
        self.with_direction(Direction::Input)
    }

    /// Devices with at least one output stream
    pub fn output(&self) -> Vec<Device> {
        self.with_direction(Direction::Output)
    }

    pub fn with_direction(&self, direction: Direction) -> Vec<Device> {
        self.list_all()
            .into_iter()
            .filter(|device| device.supports(direction))
            .collect()
    }

    /// Resolve a single id
    pub fn get(&self, id: AudioObjectId) -> Result<Device> {
        descriptor::build(self.store, id)
    }
}

impl std::fmt::Debug for DeviceEnumerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceEnumerator")
            .field("store", &"PropertyStore")
            .finish()
    }
}
