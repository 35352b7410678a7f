// Device descriptor assembly
//
// Builds a `Device` snapshot out of independent property reads. The per-field
// failure policy is fixed:
// - name, uid: required, any failure means the id is not a live device
// - input/output capability: stream list size, a failed read counts as zero streams
// - volume, mute: gated on `has_property`, a failed read means unsupported
// - transport type: a failed read or unrecognized code means `Unknown`

use colored::Colorize;
use tracing::{debug, info};

use crate::audio::error::{AudioDevicesError, Result};
use crate::audio::properties::{selectors, AudioObjectId, PropertyAddress, PropertyStore, Scope};
use crate::audio::types::{Device, Direction, TransportType};

/// Read every property of `id` and assemble a snapshot
pub fn build(store: &dyn PropertyStore, id: AudioObjectId) -> Result<Device> {
    let name = store
        .get_string(&PropertyAddress::device(id, selectors::OBJECT_NAME, Scope::Global))
        .map_err(|e| {
            debug!("Device {} has no readable name: {}", id, e);
            AudioDevicesError::InvalidDeviceId { id }
        })?;

    let uid = store
        .get_string(&PropertyAddress::device(id, selectors::DEVICE_UID, Scope::Global))
        .map_err(|e| {
            debug!("Device {} has no readable uid: {}", id, e);
            AudioDevicesError::InvalidDeviceId { id }
        })?;

    let is_input = has_streams(store, id, Direction::Input);
    let is_output = has_streams(store, id, Direction::Output);

    Ok(Device {
        id,
        name,
        uid,
        is_input,
        is_output,
        input_volume: read_volume(store, id, Direction::Input),
        output_volume: read_volume(store, id, Direction::Output),
        input_muted: read_mute(store, id, Direction::Input),
        output_muted: read_mute(store, id, Direction::Output),
        transport_type: read_transport_type(store, id),
    })
}

fn has_streams(store: &dyn PropertyStore, id: AudioObjectId, direction: Direction) -> bool {
    let address = PropertyAddress::device(id, selectors::DEVICE_STREAMS, direction.scope());
    match store.property_size(&address) {
        Ok(size) => size > 0,
        Err(e) => {
            debug!("Treating device {} as having no {} streams: {}", id, direction, e);
            false
        }
    }
}

fn read_volume(store: &dyn PropertyStore, id: AudioObjectId, direction: Direction) -> Option<f64> {
    let address = PropertyAddress::device(id, selectors::VOLUME_SCALAR, direction.scope());
    if !store.has_property(&address) {
        return None;
    }
    match store.get_f32(&address) {
        Ok(volume) => Some(f64::from(volume)),
        Err(e) => {
            debug!("Volume of device {} unreadable: {}", id, e);
            None
        }
    }
}

fn read_mute(store: &dyn PropertyStore, id: AudioObjectId, direction: Direction) -> Option<bool> {
    let address = PropertyAddress::device(id, selectors::MUTE, direction.scope());
    if !store.has_property(&address) {
        return None;
    }
    match store.get_u32(&address) {
        Ok(muted) => Some(muted != 0),
        Err(e) => {
            debug!("Mute state of device {} unreadable: {}", id, e);
            None
        }
    }
}

fn read_transport_type(store: &dyn PropertyStore, id: AudioObjectId) -> TransportType {
    let address = PropertyAddress::device(id, selectors::TRANSPORT_TYPE, Scope::Global);
    match store.get_u32(&address) {
        Ok(code) => TransportType::from_code(code),
        Err(e) => {
            debug!("Transport type of device {} unreadable: {}", id, e);
            TransportType::Unknown
        }
    }
}

/// Volume must be a finite scalar in [0, 1]
pub fn validate_volume(value: f64) -> Result<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value as f32)
    } else {
        Err(AudioDevicesError::InvalidVolumeValue { value })
    }
}

impl Device {
    /// Write a new scalar volume and update this snapshot.
    ///
    /// The value and the device's capability are checked before anything is
    /// written, so a rejected call leaves the hardware untouched.
    pub fn set_volume(
        &mut self,
        store: &dyn PropertyStore,
        direction: Direction,
        value: f64,
    ) -> Result<()> {
        let scalar = validate_volume(value)?;
        if self.volume(direction).is_none() {
            return Err(AudioDevicesError::VolumeNotSupported {
                id: self.id,
                direction,
            });
        }

        let address = PropertyAddress::device(self.id, selectors::VOLUME_SCALAR, direction.scope());
        store.set_f32(&address, scalar)?;

        info!(
            "{} Device {} {} volume set to {:.3}",
            "VOLUME_SET".bright_green(),
            self.id,
            direction,
            value
        );
        match direction {
            Direction::Input => self.input_volume = Some(value),
            Direction::Output => self.output_volume = Some(value),
        }
        Ok(())
    }

    /// Write the mute state and update this snapshot
    pub fn set_mute(
        &mut self,
        store: &dyn PropertyStore,
        direction: Direction,
        muted: bool,
    ) -> Result<()> {
        if self.muted(direction).is_none() {
            return Err(AudioDevicesError::MuteNotSupported {
                id: self.id,
                direction,
            });
        }

        let address = PropertyAddress::device(self.id, selectors::MUTE, direction.scope());
        store.set_u32(&address, u32::from(muted))?;

        info!(
            "{} Device {} {} {}",
            "MUTE_SET".bright_green(),
            self.id,
            direction,
            if muted { "muted" } else { "unmuted" }
        );
        match direction {
            Direction::Input => self.input_muted = Some(muted),
            Direction::Output => self.output_muted = Some(muted),
        }
        Ok(())
    }

    /// Flip the mute state, returning the new value
    pub fn toggle_mute(&mut self, store: &dyn PropertyStore, direction: Direction) -> Result<bool> {
        let current = self
            .muted(direction)
            .ok_or(AudioDevicesError::MuteNotSupported {
                id: self.id,
                direction,
            })?;
        self.set_mute(store, direction, !current)?;
        Ok(!current)
    }
}
