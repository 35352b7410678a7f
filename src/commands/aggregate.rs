use anyhow::{Context, Result};

use crate::audio::{
    devices, AggregateDeviceManager, AggregateSpec, AudioObjectId, Device, PropertyStore,
};
use crate::output::{self, Format};

/// Arguments of `aggregate create`
#[derive(Debug, Clone, Copy)]
pub struct CreateRequest<'a> {
    pub name: &'a str,
    pub uid: Option<&'a str>,
    pub main_device_id: AudioObjectId,
    pub other_device_ids: &'a [AudioObjectId],
    pub multi_output: bool,
}

/// `aggregate create`: every id is resolved before the device is created
pub fn create(store: &dyn PropertyStore, request: CreateRequest<'_>, format: Format) -> Result<String> {
    let main_device = devices::build(store, request.main_device_id)
        .context("Main device of the aggregate is not available")?;
    let other_devices = request
        .other_device_ids
        .iter()
        .map(|id| devices::build(store, *id))
        .collect::<std::result::Result<Vec<Device>, _>>()
        .context("Sub-device of the aggregate is not available")?;

    let mut spec =
        AggregateSpec::new(request.name, main_device, other_devices).stacked(request.multi_output);
    if let Some(uid) = request.uid {
        spec = spec.with_uid(uid);
    }

    let device = AggregateDeviceManager::new(store).create(&spec)?;
    output::render_device(&device, format)
}

/// `aggregate destroy <deviceId>`
pub fn destroy(store: &dyn PropertyStore, device_id: AudioObjectId) -> Result<()> {
    AggregateDeviceManager::new(store).destroy(device_id)?;
    Ok(())
}
