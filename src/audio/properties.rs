// Property accessor contract for the audio hardware object model
//
// Core Audio exposes everything as properties addressed by
// (object id, selector, scope, element). This module defines that addressing
// scheme, the four-character-code constants used by this crate, and the
// `PropertyStore` trait the rest of the core talks to. The macOS backend lives
// in `coreaudio.rs`; tests use an in-memory store.

use std::fmt;

use super::error::Result;

/// Opaque platform-assigned handle of an audio object.
pub type AudioObjectId = u32;

/// Build a Core Audio four-character code from its ASCII spelling.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    ((code[0] as u32) << 24) | ((code[1] as u32) << 16) | ((code[2] as u32) << 8) | code[3] as u32
}

/// The system-wide hardware object (`kAudioObjectSystemObject`)
pub const SYSTEM_OBJECT: AudioObjectId = 1;

/// `kAudioObjectUnknown`, returned when no default device is configured
pub const UNKNOWN_OBJECT: AudioObjectId = 0;

/// `kAudioObjectPropertyElementMain`
pub const ELEMENT_MAIN: u32 = 0;

pub mod selectors {
    use super::fourcc;

    pub const HARDWARE_DEVICES: u32 = fourcc(b"dev#");
    pub const DEFAULT_INPUT_DEVICE: u32 = fourcc(b"dIn ");
    pub const DEFAULT_OUTPUT_DEVICE: u32 = fourcc(b"dOut");
    pub const DEFAULT_SYSTEM_OUTPUT_DEVICE: u32 = fourcc(b"sOut");

    pub const OBJECT_NAME: u32 = fourcc(b"lnam");
    pub const DEVICE_UID: u32 = fourcc(b"uid ");
    pub const DEVICE_STREAMS: u32 = fourcc(b"stm#");
    pub const VOLUME_SCALAR: u32 = fourcc(b"volm");
    pub const MUTE: u32 = fourcc(b"mute");
    pub const TRANSPORT_TYPE: u32 = fourcc(b"tran");
}

/// Directionality qualifier for a property query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Input,
    Output,
}

impl Scope {
    pub const fn code(self) -> u32 {
        match self {
            Scope::Global => fourcc(b"glob"),
            Scope::Input => fourcc(b"inpt"),
            Scope::Output => fourcc(b"outp"),
        }
    }
}

/// Full address of one hardware property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyAddress {
    pub object: AudioObjectId,
    pub selector: u32,
    pub scope: Scope,
    pub element: u32,
}

impl PropertyAddress {
    /// Property of the system object, global scope
    pub const fn global(selector: u32) -> Self {
        Self::device(SYSTEM_OBJECT, selector, Scope::Global)
    }

    /// Property of a specific device in the given scope
    pub const fn device(object: AudioObjectId, selector: u32, scope: Scope) -> Self {
        Self {
            object,
            selector,
            scope,
            element: ELEMENT_MAIN,
        }
    }
}

impl fmt::Display for PropertyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({:?} scope) of object {}",
            fourcc_to_string(self.selector),
            self.scope,
            self.object
        )
    }
}

/// Render a four-character code, falling back to hex for non-printable bytes
pub fn fourcc_to_string(code: u32) -> String {
    let bytes = code.to_be_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        bytes.iter().map(|&b| b as char).collect()
    } else {
        format!("{:#010x}", code)
    }
}

/// One member of an aggregate device's sub-device list
#[derive(Debug, Clone, PartialEq)]
pub struct SubDeviceEntry {
    pub uid: String,
    pub drift_compensation: bool,
}

/// Structured description submitted to the OS to create an aggregate device.
///
/// Mirrors the CFDictionary Core Audio expects: `name`, `uid`,
/// `subdevices` (each `{uid, drift}`), `master` and `stacked`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateDescription {
    pub name: String,
    pub uid: String,
    pub sub_devices: Vec<SubDeviceEntry>,
    pub main_uid: String,
    pub stacked: bool,
}

/// Capability set over the OS audio registry.
///
/// Every call goes straight to the operating system; implementations perform
/// no caching and no retries. A non-zero status becomes
/// `PropertyUnavailable` for reads and `PropertyRejected` for writes.
pub trait PropertyStore {
    fn has_property(&self, address: &PropertyAddress) -> bool;

    /// Byte size of the property's current value
    fn property_size(&self, address: &PropertyAddress) -> Result<u32>;

    fn get_u32(&self, address: &PropertyAddress) -> Result<u32>;

    fn get_f32(&self, address: &PropertyAddress) -> Result<f32>;

    fn get_string(&self, address: &PropertyAddress) -> Result<String>;

    /// Read a flat array of object ids (e.g. the hardware device list)
    fn get_object_list(&self, address: &PropertyAddress) -> Result<Vec<AudioObjectId>>;

    fn set_u32(&self, address: &PropertyAddress, value: u32) -> Result<()>;

    fn set_f32(&self, address: &PropertyAddress, value: f32) -> Result<()>;

    /// Submit an aggregate description in a single atomic call, returning the new device id
    fn create_aggregate_device(&self, description: &AggregateDescription) -> Result<AudioObjectId>;

    fn destroy_aggregate_device(&self, id: AudioObjectId) -> Result<()>;
}
