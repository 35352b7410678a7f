// Text and JSON presentation of command results

use anyhow::Result;
use serde::Serialize;

use crate::audio::{Device, TransportType};

/// Output format chosen from flags and config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pub json: bool,
    pub pretty: bool,
}

/// JSON record of a device.
///
/// `volume` repeats the output volume so consumers of the single-volume
/// record keep working.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceJson<'a> {
    pub id: u32,
    pub name: &'a str,
    pub uid: &'a str,
    pub is_input: bool,
    pub is_output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_input_muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_output_muted: Option<bool>,
    pub transport_type: TransportType,
}

impl<'a> From<&'a Device> for DeviceJson<'a> {
    fn from(device: &'a Device) -> Self {
        Self {
            id: device.id,
            name: &device.name,
            uid: &device.uid,
            is_input: device.is_input,
            is_output: device.is_output,
            volume: device.output_volume,
            input_volume: device.input_volume,
            output_volume: device.output_volume,
            is_input_muted: device.input_muted,
            is_output_muted: device.output_muted,
            transport_type: device.transport_type,
        }
    }
}

fn to_json<T: Serialize>(value: &T, format: Format) -> Result<String> {
    let json = if format.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// One-line human description, e.g. `2. Built-in Output (output, builtin, volume 0.75)`
pub fn device_line(device: &Device) -> String {
    let mut details = Vec::new();
    match (device.is_input, device.is_output) {
        (true, true) => details.push("input/output".to_string()),
        (true, false) => details.push("input".to_string()),
        (false, true) => details.push("output".to_string()),
        (false, false) => {}
    }
    details.push(device.transport_type.to_string());
    if let Some(volume) = device.output_volume {
        details.push(format!("volume {}", volume_text(volume)));
    }
    if device.output_muted == Some(true) || device.input_muted == Some(true) {
        details.push("muted".to_string());
    }
    format!("{}. {} ({})", device.id, device.name, details.join(", "))
}

pub fn render_device(device: &Device, format: Format) -> Result<String> {
    if format.json {
        to_json(&DeviceJson::from(device), format)
    } else {
        Ok(device_line(device))
    }
}

pub fn render_devices(devices: &[Device], format: Format) -> Result<String> {
    if format.json {
        let records: Vec<DeviceJson<'_>> = devices.iter().map(DeviceJson::from).collect();
        to_json(&records, format)
    } else {
        Ok(devices
            .iter()
            .map(device_line)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Volume as a bare number, every digit the hardware reported
pub fn volume_text(volume: f64) -> String {
    volume.to_string()
}
