// Audio devices module - device queries and hardware control
//
// - descriptor: assembles a `Device` snapshot from property reads, plus volume/mute writes
// - enumeration: lists every device, with input/output views
// - defaults: system default input/output/system-sound devices
// - aggregate_device: aggregate and multi-output device lifecycle

pub mod aggregate_device;
pub mod defaults;
pub mod descriptor;
pub mod enumeration;

pub use aggregate_device::AggregateDeviceManager;
pub use defaults::DefaultDeviceSelector;
pub use descriptor::{build, validate_volume};
pub use enumeration::DeviceEnumerator;
