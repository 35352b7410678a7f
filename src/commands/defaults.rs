use anyhow::Result;

use crate::audio::{devices, AudioObjectId, DefaultDeviceSelector, DeviceRole, PropertyStore};
use crate::output::{self, Format};

/// `<role> get`
pub fn get(store: &dyn PropertyStore, role: DeviceRole, format: Format) -> Result<String> {
    let device = DefaultDeviceSelector::new(store).get(role)?;
    output::render_device(&device, format)
}

/// `<role> set <deviceId>`
pub fn set(store: &dyn PropertyStore, role: DeviceRole, device_id: AudioObjectId) -> Result<()> {
    let device = devices::build(store, device_id)?;
    DefaultDeviceSelector::new(store).set(role, &device)?;
    Ok(())
}
