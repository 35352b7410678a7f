use anyhow::Result;

use crate::audio::{AudioObjectId, DeviceEnumerator, Direction, PropertyStore};
use crate::output::{self, Format};

/// `list [--input|--output]`
pub fn list(store: &dyn PropertyStore, filter: Option<Direction>, format: Format) -> Result<String> {
    let enumerator = DeviceEnumerator::new(store);
    let devices = match filter {
        Some(direction) => enumerator.with_direction(direction),
        None => enumerator.list_all(),
    };
    output::render_devices(&devices, format)
}

/// `get <deviceId>`
pub fn get(store: &dyn PropertyStore, device_id: AudioObjectId, format: Format) -> Result<String> {
    let device = DeviceEnumerator::new(store).get(device_id)?;
    output::render_device(&device, format)
}
