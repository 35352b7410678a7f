use anyhow::Result;

use crate::audio::{devices, AudioDevicesError, AudioObjectId, Direction, PropertyStore};

/// `mute get <deviceId>`
pub fn get(store: &dyn PropertyStore, device_id: AudioObjectId, direction: Direction) -> Result<String> {
    let device = devices::build(store, device_id)?;
    let muted = device
        .muted(direction)
        .ok_or(AudioDevicesError::MuteNotSupported {
            id: device_id,
            direction,
        })?;
    Ok(muted.to_string())
}

/// `mute set <deviceId> <true|false>`
pub fn set(
    store: &dyn PropertyStore,
    device_id: AudioObjectId,
    direction: Direction,
    muted: bool,
) -> Result<()> {
    let mut device = devices::build(store, device_id)?;
    device.set_mute(store, direction, muted)?;
    Ok(())
}

/// `mute toggle <deviceId>`: prints the new state
pub fn toggle(store: &dyn PropertyStore, device_id: AudioObjectId, direction: Direction) -> Result<String> {
    let mut device = devices::build(store, device_id)?;
    let muted = device.toggle_mute(store, direction)?;
    Ok(muted.to_string())
}
