use anyhow::Result;

use crate::audio::{devices, AudioDevicesError, AudioObjectId, Direction, PropertyStore};
use crate::output;

/// `volume get <deviceId>`: prints the bare scalar
pub fn get(store: &dyn PropertyStore, device_id: AudioObjectId, direction: Direction) -> Result<String> {
    let device = devices::build(store, device_id)?;
    let volume = device
        .volume(direction)
        .ok_or(AudioDevicesError::VolumeNotSupported {
            id: device_id,
            direction,
        })?;
    Ok(output::volume_text(volume))
}

/// `volume set <deviceId> <volume>`
pub fn set(
    store: &dyn PropertyStore,
    device_id: AudioObjectId,
    direction: Direction,
    volume: f64,
) -> Result<()> {
    // Range errors take precedence over lookup errors
    devices::validate_volume(volume)?;
    let mut device = devices::build(store, device_id)?;
    device.set_volume(store, direction, volume)?;
    Ok(())
}
