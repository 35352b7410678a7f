// Core Audio backend for the property accessor (macOS only)
//
// Thin unsafe wrappers around the AudioObject property API. Every call goes
// straight to the HAL; a non-zero OSStatus is returned as a typed error and
// never retried.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use coreaudio_sys::{
    AudioHardwareCreateAggregateDevice, AudioHardwareDestroyAggregateDevice,
    AudioObjectGetPropertyData, AudioObjectGetPropertyDataSize, AudioObjectHasProperty,
    AudioObjectPropertyAddress, AudioObjectSetPropertyData,
};
use tracing::trace;

use super::error::{AudioDevicesError, Result};
use super::properties::{AggregateDescription, AudioObjectId, PropertyAddress, PropertyStore};

// Literal values of the kAudioAggregateDevice*Key / kAudioSubDevice*Key constants
const AGGREGATE_DEVICE_NAME_KEY: &str = "name";
const AGGREGATE_DEVICE_UID_KEY: &str = "uid";
const AGGREGATE_DEVICE_SUB_DEVICE_LIST_KEY: &str = "subdevices";
const AGGREGATE_DEVICE_MAIN_SUB_DEVICE_KEY: &str = "master";
const AGGREGATE_DEVICE_IS_STACKED_KEY: &str = "stacked";
const SUB_DEVICE_UID_KEY: &str = "uid";
const SUB_DEVICE_DRIFT_COMPENSATION_KEY: &str = "drift";

/// Live Core Audio hardware
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreAudioHardware;

impl CoreAudioHardware {
    pub fn new() -> Self {
        Self
    }

    /// Read a fixed-size value into `value`
    fn get_raw<T>(&self, address: &PropertyAddress, value: &mut T) -> Result<()> {
        let raw = to_raw(address);
        let mut size = mem::size_of::<T>() as u32;
        let status = unsafe {
            AudioObjectGetPropertyData(
                address.object,
                &raw,
                0,
                ptr::null(),
                &mut size,
                value as *mut T as *mut c_void,
            )
        };
        trace!("get {} -> status {}", address, status);
        if status != 0 {
            return Err(AudioDevicesError::unavailable(*address, status));
        }
        Ok(())
    }

    fn set_raw<T>(&self, address: &PropertyAddress, value: &T) -> Result<()> {
        let raw = to_raw(address);
        let status = unsafe {
            AudioObjectSetPropertyData(
                address.object,
                &raw,
                0,
                ptr::null(),
                mem::size_of::<T>() as u32,
                value as *const T as *const c_void,
            )
        };
        trace!("set {} -> status {}", address, status);
        if status != 0 {
            return Err(AudioDevicesError::rejected(format!("write of {}", address), status));
        }
        Ok(())
    }
}

fn to_raw(address: &PropertyAddress) -> AudioObjectPropertyAddress {
    AudioObjectPropertyAddress {
        mSelector: address.selector,
        mScope: address.scope.code(),
        mElement: address.element,
    }
}

impl PropertyStore for CoreAudioHardware {
    fn has_property(&self, address: &PropertyAddress) -> bool {
        let raw = to_raw(address);
        unsafe { AudioObjectHasProperty(address.object, &raw) != 0 }
    }

    fn property_size(&self, address: &PropertyAddress) -> Result<u32> {
        let raw = to_raw(address);
        let mut size: u32 = 0;
        let status = unsafe {
            AudioObjectGetPropertyDataSize(address.object, &raw, 0, ptr::null(), &mut size)
        };
        if status != 0 {
            return Err(AudioDevicesError::unavailable(*address, status));
        }
        Ok(size)
    }

    fn get_u32(&self, address: &PropertyAddress) -> Result<u32> {
        let mut value: u32 = 0;
        self.get_raw(address, &mut value)?;
        Ok(value)
    }

    fn get_f32(&self, address: &PropertyAddress) -> Result<f32> {
        let mut value: f32 = 0.0;
        self.get_raw(address, &mut value)?;
        Ok(value)
    }

    fn get_string(&self, address: &PropertyAddress) -> Result<String> {
        let mut value: CFStringRef = ptr::null();
        self.get_raw(address, &mut value)?;
        if value.is_null() {
            return Err(AudioDevicesError::unavailable(*address, 0));
        }
        // The HAL hands out a retained CFString; the wrapper releases it on drop.
        let string = unsafe { CFString::wrap_under_create_rule(value) };
        Ok(string.to_string())
    }

    fn get_object_list(&self, address: &PropertyAddress) -> Result<Vec<AudioObjectId>> {
        let size = self.property_size(address)?;
        let count = size as usize / mem::size_of::<AudioObjectId>();
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut ids: Vec<AudioObjectId> = vec![0; count];
        let raw = to_raw(address);
        let mut actual_size = size;
        let status = unsafe {
            AudioObjectGetPropertyData(
                address.object,
                &raw,
                0,
                ptr::null(),
                &mut actual_size,
                ids.as_mut_ptr() as *mut c_void,
            )
        };
        if status != 0 {
            return Err(AudioDevicesError::unavailable(*address, status));
        }

        // The list can shrink between the size query and the read
        ids.truncate(actual_size as usize / mem::size_of::<AudioObjectId>());
        Ok(ids)
    }

    fn set_u32(&self, address: &PropertyAddress, value: u32) -> Result<()> {
        self.set_raw(address, &value)
    }

    fn set_f32(&self, address: &PropertyAddress, value: f32) -> Result<()> {
        self.set_raw(address, &value)
    }

    fn create_aggregate_device(&self, description: &AggregateDescription) -> Result<AudioObjectId> {
        let dictionary = description_to_dictionary(description);
        let mut device_id: AudioObjectId = 0;
        let status = unsafe {
            AudioHardwareCreateAggregateDevice(
                dictionary.as_concrete_TypeRef() as _,
                &mut device_id,
            )
        };
        if status != 0 {
            return Err(AudioDevicesError::rejected(
                format!("creation of aggregate device '{}'", description.name),
                status,
            ));
        }
        Ok(device_id)
    }

    fn destroy_aggregate_device(&self, id: AudioObjectId) -> Result<()> {
        let status = unsafe { AudioHardwareDestroyAggregateDevice(id) };
        if status != 0 {
            return Err(AudioDevicesError::rejected(
                format!("destruction of aggregate device {}", id),
                status,
            ));
        }
        Ok(())
    }
}

fn description_to_dictionary(description: &AggregateDescription) -> CFDictionary<CFString, CFType> {
    let sub_devices: Vec<CFDictionary<CFString, CFType>> = description
        .sub_devices
        .iter()
        .map(|entry| {
            CFDictionary::from_CFType_pairs(&[
                (
                    CFString::new(SUB_DEVICE_UID_KEY),
                    CFString::new(&entry.uid).as_CFType(),
                ),
                (
                    CFString::new(SUB_DEVICE_DRIFT_COMPENSATION_KEY),
                    CFNumber::from(i32::from(entry.drift_compensation)).as_CFType(),
                ),
            ])
        })
        .collect();

    CFDictionary::from_CFType_pairs(&[
        (
            CFString::new(AGGREGATE_DEVICE_NAME_KEY),
            CFString::new(&description.name).as_CFType(),
        ),
        (
            CFString::new(AGGREGATE_DEVICE_UID_KEY),
            CFString::new(&description.uid).as_CFType(),
        ),
        (
            CFString::new(AGGREGATE_DEVICE_SUB_DEVICE_LIST_KEY),
            CFArray::from_CFTypes(&sub_devices).as_CFType(),
        ),
        (
            CFString::new(AGGREGATE_DEVICE_MAIN_SUB_DEVICE_KEY),
            CFString::new(&description.main_uid).as_CFType(),
        ),
        (
            CFString::new(AGGREGATE_DEVICE_IS_STACKED_KEY),
            CFNumber::from(i32::from(description.stacked)).as_CFType(),
        ),
    ])
}
