use colored::Colorize;
use tracing::{error, info};

use super::descriptor;
use crate::audio::error::{AudioDevicesError, Result};
use crate::audio::properties::{
    AggregateDescription, AudioObjectId, PropertyStore, SubDeviceEntry,
};
use crate::audio::types::{AggregateSpec, Device};

/// Creates and destroys aggregate (and multi-output) devices
pub struct AggregateDeviceManager<'a> {
    store: &'a dyn PropertyStore,
}

impl<'a> AggregateDeviceManager<'a> {
    pub fn new(store: &'a dyn PropertyStore) -> Self {
        Self { store }
    }

    /// Build the description Core Audio expects for `spec`.
    ///
    /// The main device is first in the sub-device list and is the only entry
    /// without drift compensation; it is also the aggregate's clock source.
    pub fn describe(spec: &AggregateSpec) -> Result<AggregateDescription> {
        if spec.other_devices.is_empty() {
            return Err(AudioDevicesError::InvalidAggregate(
                "at least one device besides the main device is required".to_string(),
            ));
        }

        let sub_devices = std::iter::once(&spec.main_device)
            .chain(spec.other_devices.iter())
            .map(|device| SubDeviceEntry {
                uid: device.uid.clone(),
                drift_compensation: device.id != spec.main_device.id,
            })
            .collect();

        Ok(AggregateDescription {
            name: spec.name.clone(),
            uid: spec.uid.clone(),
            sub_devices,
            main_uid: spec.main_device.uid.clone(),
            stacked: spec.stacked,
        })
    }

    /// Create the aggregate and return a fresh snapshot of it
    pub fn create(&self, spec: &AggregateSpec) -> Result<Device> {
        let description = Self::describe(spec)?;

        info!(
            "{} Creating {} '{}' (uid '{}') from {} devices",
            "AGGREGATE_CREATE".bright_cyan(),
            if spec.stacked {
                "multi-output device"
            } else {
                "aggregate device"
            },
            description.name,
            description.uid,
            description.sub_devices.len()
        );

        let device_id = self
            .store
            .create_aggregate_device(&description)
            .map_err(|e| {
                error!(
                    "{} Failed to create aggregate device: {}",
                    "AGGREGATE_ERROR".bright_red(),
                    e
                );
                e
            })?;

        info!(
            "{} Created aggregate device with ID: {}",
            "AGGREGATE_CREATED".bright_green(),
            device_id
        );

        descriptor::build(self.store, device_id)
    }

    /// Destroy an aggregate device by id. No confirmation read follows.
    pub fn destroy(&self, device_id: AudioObjectId) -> Result<()> {
        info!(
            "{} Destroying aggregate device with ID: {}",
            "AGGREGATE_DESTROY".bright_yellow(),
            device_id
        );

        self.store.destroy_aggregate_device(device_id).map_err(|e| {
            error!(
                "{} Failed to destroy aggregate device {}: {}",
                "AGGREGATE_ERROR".bright_red(),
                device_id,
                e
            );
            e
        })?;

        info!(
            "{} Destroyed aggregate device {}",
            "AGGREGATE_DESTROYED".bright_green(),
            device_id
        );
        Ok(())
    }
}
