// System default device selection (input, output, system sounds)

use colored::Colorize;
use tracing::{info, warn};

use super::descriptor;
use crate::audio::error::{AudioDevicesError, Result};
use crate::audio::properties::{PropertyAddress, PropertyStore, UNKNOWN_OBJECT};
use crate::audio::types::{Device, DeviceRole};

/// Reads and writes the system-wide default device for each role
pub struct DefaultDeviceSelector<'a> {
    store: &'a dyn PropertyStore,
}

impl<'a> DefaultDeviceSelector<'a> {
    pub fn new(store: &'a dyn PropertyStore) -> Self {
        Self { store }
    }

    /// Current default device for `role`
    pub fn get(&self, role: DeviceRole) -> Result<Device> {
        let id = self
            .store
            .get_u32(&PropertyAddress::global(role.selector()))?;
        if id == UNKNOWN_OBJECT {
            return Err(AudioDevicesError::NoDefaultDevice { role });
        }
        descriptor::build(self.store, id)
    }

    /// Make `device` the default for `role`.
    ///
    /// A device lacking the role's capability is rejected before any write.
    pub fn set(&self, role: DeviceRole, device: &Device) -> Result<()> {
        if !role.accepts(device) {
            warn!(
                "Refusing to make device {} ({}) the default {} device",
                device.id, device.name, role
            );
            return Err(AudioDevicesError::InvalidDevice {
                id: device.id,
                role,
            });
        }

        self.store
            .set_u32(&PropertyAddress::global(role.selector()), device.id)?;

        info!(
            "{} Default {} device is now {} ({})",
            "DEFAULT_SET".bright_green(),
            role,
            device.id,
            device.name
        );
        Ok(())
    }
}
