// In-memory stand-in for the Core Audio hardware registry
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use audio_devices_lib::audio::properties::{
    fourcc, selectors, AggregateDescription, AudioObjectId, PropertyAddress, PropertyStore, Scope,
    SYSTEM_OBJECT,
};
use audio_devices_lib::audio::{AudioDevicesError, Result, TransportType};

pub const BAD_OBJECT: i32 = 0x216F_626A; // '!obj'
pub const UNKNOWN_PROPERTY: i32 = 0x7768_6F3F; // 'who?'
pub const ILLEGAL_OPERATION: i32 = 0x6E6F_7065; // 'nope'

const STREAM_ID_SIZE: u32 = 4;

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub name: String,
    pub uid: String,
    pub input_streams: u32,
    pub output_streams: u32,
    pub input_volume: Option<f32>,
    pub output_volume: Option<f32>,
    pub input_mute: Option<u32>,
    pub output_mute: Option<u32>,
    pub transport: Option<u32>,
}

impl FakeDevice {
    pub fn new(name: &str, uid: &str) -> Self {
        Self {
            name: name.to_string(),
            uid: uid.to_string(),
            input_streams: 0,
            output_streams: 0,
            input_volume: None,
            output_volume: None,
            input_mute: None,
            output_mute: None,
            transport: Some(TransportType::BuiltIn.code()),
        }
    }

    pub fn input(mut self, streams: u32) -> Self {
        self.input_streams = streams;
        self
    }

    pub fn output(mut self, streams: u32) -> Self {
        self.output_streams = streams;
        self
    }

    pub fn output_volume(mut self, volume: f32) -> Self {
        self.output_volume = Some(volume);
        self
    }

    pub fn input_volume(mut self, volume: f32) -> Self {
        self.input_volume = Some(volume);
        self
    }

    pub fn output_mute(mut self, muted: bool) -> Self {
        self.output_mute = Some(u32::from(muted));
        self
    }

    pub fn input_mute(mut self, muted: bool) -> Self {
        self.input_mute = Some(u32::from(muted));
        self
    }

    pub fn transport(mut self, code: Option<u32>) -> Self {
        self.transport = code;
        self
    }
}

/// Every mutating call the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    U32(PropertyAddress, u32),
    F32(PropertyAddress, f32),
    CreateAggregate(AggregateDescription),
    DestroyAggregate(AudioObjectId),
}

#[derive(Debug, Default)]
struct State {
    devices: BTreeMap<AudioObjectId, FakeDevice>,
    defaults: HashMap<u32, AudioObjectId>,
    ghost_ids: Vec<AudioObjectId>,
    failing_reads: HashSet<(AudioObjectId, u32)>,
    rejected_writes: HashSet<u32>,
    create_status: Option<i32>,
    next_id: AudioObjectId,
    aggregates: HashSet<AudioObjectId>,
    writes: Vec<Write>,
}

#[derive(Debug)]
pub struct FakeHardware {
    state: RefCell<State>,
}

impl Default for FakeHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHardware {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    pub fn with_device(self, id: AudioObjectId, device: FakeDevice) -> Self {
        self.state.borrow_mut().devices.insert(id, device);
        self
    }

    pub fn with_default(self, selector: u32, id: AudioObjectId) -> Self {
        self.state.borrow_mut().defaults.insert(selector, id);
        self
    }

    /// An id that shows up in the device list but no longer resolves
    pub fn with_ghost(self, id: AudioObjectId) -> Self {
        self.state.borrow_mut().ghost_ids.push(id);
        self
    }

    pub fn failing_read(self, object: AudioObjectId, selector: u32) -> Self {
        self.state.borrow_mut().failing_reads.insert((object, selector));
        self
    }

    pub fn rejecting_writes(self, selector: u32) -> Self {
        self.state.borrow_mut().rejected_writes.insert(selector);
        self
    }

    pub fn rejecting_create(self, status: i32) -> Self {
        self.state.borrow_mut().create_status = Some(status);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.borrow().writes.clone()
    }

    pub fn device(&self, id: AudioObjectId) -> Option<FakeDevice> {
        self.state.borrow().devices.get(&id).cloned()
    }

    pub fn default_for(&self, selector: u32) -> Option<AudioObjectId> {
        self.state.borrow().defaults.get(&selector).copied()
    }

    fn check_read(&self, address: &PropertyAddress) -> Result<()> {
        if self
            .state
            .borrow()
            .failing_reads
            .contains(&(address.object, address.selector))
        {
            return Err(AudioDevicesError::PropertyUnavailable {
                property: *address,
                status: UNKNOWN_PROPERTY,
            });
        }
        Ok(())
    }

    fn with_device_ref<T>(
        &self,
        address: &PropertyAddress,
        read: impl FnOnce(&FakeDevice) -> Option<T>,
    ) -> Result<T> {
        self.check_read(address)?;
        let state = self.state.borrow();
        let device = state.devices.get(&address.object).ok_or(
            AudioDevicesError::PropertyUnavailable {
                property: *address,
                status: BAD_OBJECT,
            },
        )?;
        read(device).ok_or(AudioDevicesError::PropertyUnavailable {
            property: *address,
            status: UNKNOWN_PROPERTY,
        })
    }

    fn reject(&self, address: &PropertyAddress) -> AudioDevicesError {
        AudioDevicesError::PropertyRejected {
            operation: format!("write of {}", address),
            status: ILLEGAL_OPERATION,
        }
    }
}

/// System-object selectors. The system object shares id 1 with the first
/// fixture device, so only these selectors are routed to it.
fn is_system_property(address: &PropertyAddress) -> bool {
    address.object == SYSTEM_OBJECT
        && [
            selectors::HARDWARE_DEVICES,
            selectors::DEFAULT_INPUT_DEVICE,
            selectors::DEFAULT_OUTPUT_DEVICE,
            selectors::DEFAULT_SYSTEM_OUTPUT_DEVICE,
        ]
        .contains(&address.selector)
}

fn scoped<T: Copy>(scope: Scope, input: Option<T>, output: Option<T>) -> Option<T> {
    match scope {
        Scope::Input => input,
        Scope::Output => output,
        Scope::Global => None,
    }
}

impl PropertyStore for FakeHardware {
    fn has_property(&self, address: &PropertyAddress) -> bool {
        let state = self.state.borrow();
        if is_system_property(address) {
            return address.selector == selectors::HARDWARE_DEVICES
                || state.defaults.contains_key(&address.selector);
        }
        let Some(device) = state.devices.get(&address.object) else {
            return false;
        };
        match address.selector {
            s if s == selectors::VOLUME_SCALAR => {
                scoped(address.scope, device.input_volume, device.output_volume).is_some()
            }
            s if s == selectors::MUTE => {
                scoped(address.scope, device.input_mute, device.output_mute).is_some()
            }
            s if s == selectors::TRANSPORT_TYPE => device.transport.is_some(),
            _ => true,
        }
    }

    fn property_size(&self, address: &PropertyAddress) -> Result<u32> {
        if is_system_property(address) {
            return Ok(self.get_object_list(address)?.len() as u32 * STREAM_ID_SIZE);
        }
        self.with_device_ref(address, |device| match address.selector {
            s if s == selectors::DEVICE_STREAMS => match address.scope {
                Scope::Input => Some(device.input_streams * STREAM_ID_SIZE),
                Scope::Output => Some(device.output_streams * STREAM_ID_SIZE),
                Scope::Global => Some((device.input_streams + device.output_streams) * STREAM_ID_SIZE),
            },
            _ => None,
        })
    }

    fn get_u32(&self, address: &PropertyAddress) -> Result<u32> {
        if is_system_property(address) {
            self.check_read(address)?;
            return self
                .state
                .borrow()
                .defaults
                .get(&address.selector)
                .copied()
                .ok_or(AudioDevicesError::PropertyUnavailable {
                    property: *address,
                    status: UNKNOWN_PROPERTY,
                });
        }
        self.with_device_ref(address, |device| match address.selector {
            s if s == selectors::MUTE => scoped(address.scope, device.input_mute, device.output_mute),
            s if s == selectors::TRANSPORT_TYPE => device.transport,
            _ => None,
        })
    }

    fn get_f32(&self, address: &PropertyAddress) -> Result<f32> {
        self.with_device_ref(address, |device| match address.selector {
            s if s == selectors::VOLUME_SCALAR => {
                scoped(address.scope, device.input_volume, device.output_volume)
            }
            _ => None,
        })
    }

    fn get_string(&self, address: &PropertyAddress) -> Result<String> {
        self.with_device_ref(address, |device| match address.selector {
            s if s == selectors::OBJECT_NAME => Some(device.name.clone()),
            s if s == selectors::DEVICE_UID => Some(device.uid.clone()),
            _ => None,
        })
    }

    fn get_object_list(&self, address: &PropertyAddress) -> Result<Vec<AudioObjectId>> {
        self.check_read(address)?;
        if address.object != SYSTEM_OBJECT || address.selector != selectors::HARDWARE_DEVICES {
            return Err(AudioDevicesError::PropertyUnavailable {
                property: *address,
                status: UNKNOWN_PROPERTY,
            });
        }
        let state = self.state.borrow();
        let mut ids: Vec<AudioObjectId> = state.devices.keys().copied().collect();
        ids.extend(state.ghost_ids.iter().copied());
        Ok(ids)
    }

    fn set_u32(&self, address: &PropertyAddress, value: u32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::U32(*address, value));
        if state.rejected_writes.contains(&address.selector) {
            return Err(self.reject(address));
        }

        if is_system_property(address) {
            state.defaults.insert(address.selector, value);
            return Ok(());
        }
        let scope = address.scope;
        let device = state
            .devices
            .get_mut(&address.object)
            .ok_or_else(|| self.reject(address))?;
        let slot = match (address.selector, scope) {
            (s, Scope::Input) if s == selectors::MUTE => &mut device.input_mute,
            (s, Scope::Output) if s == selectors::MUTE => &mut device.output_mute,
            _ => return Err(self.reject(address)),
        };
        if slot.is_none() {
            return Err(self.reject(address));
        }
        *slot = Some(value);
        Ok(())
    }

    fn set_f32(&self, address: &PropertyAddress, value: f32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::F32(*address, value));
        if state.rejected_writes.contains(&address.selector) {
            return Err(self.reject(address));
        }

        let scope = address.scope;
        let device = state
            .devices
            .get_mut(&address.object)
            .ok_or_else(|| self.reject(address))?;
        let slot = match (address.selector, scope) {
            (s, Scope::Input) if s == selectors::VOLUME_SCALAR => &mut device.input_volume,
            (s, Scope::Output) if s == selectors::VOLUME_SCALAR => &mut device.output_volume,
            _ => return Err(self.reject(address)),
        };
        if slot.is_none() {
            return Err(self.reject(address));
        }
        *slot = Some(value);
        Ok(())
    }

    fn create_aggregate_device(&self, description: &AggregateDescription) -> Result<AudioObjectId> {
        let mut state = self.state.borrow_mut();
        state
            .writes
            .push(Write::CreateAggregate(description.clone()));
        if let Some(status) = state.create_status {
            return Err(AudioDevicesError::PropertyRejected {
                operation: format!("creation of aggregate device '{}'", description.name),
                status,
            });
        }

        let members: Vec<FakeDevice> = description
            .sub_devices
            .iter()
            .filter_map(|entry| state.devices.values().find(|d| d.uid == entry.uid).cloned())
            .collect();
        let input_streams = if description.stacked {
            0
        } else {
            members.iter().map(|d| d.input_streams).sum()
        };
        let output_streams = members.iter().map(|d| d.output_streams).sum();

        let id = state.next_id;
        state.next_id += 1;
        state.aggregates.insert(id);
        state.devices.insert(
            id,
            FakeDevice::new(&description.name, &description.uid)
                .input(input_streams)
                .output(output_streams)
                .transport(Some(fourcc(b"grup"))),
        );
        Ok(id)
    }

    fn destroy_aggregate_device(&self, id: AudioObjectId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes.push(Write::DestroyAggregate(id));
        if !state.aggregates.remove(&id) {
            return Err(AudioDevicesError::PropertyRejected {
                operation: format!("destruction of aggregate device {}", id),
                status: BAD_OBJECT,
            });
        }
        state.devices.remove(&id);
        Ok(())
    }
}

/// The two-device system used throughout the tests:
/// 1 = "Built-in Microphone" (input), 2 = "Built-in Output" (output, volume 0.75)
pub fn builtin_pair() -> FakeHardware {
    FakeHardware::new()
        .with_device(
            1,
            FakeDevice::new("Built-in Microphone", "BuiltInMicrophoneDevice")
                .input(1)
                .input_volume(0.5)
                .input_mute(false),
        )
        .with_device(
            2,
            FakeDevice::new("Built-in Output", "BuiltInSpeakerDevice")
                .output(1)
                .output_volume(0.75)
                .output_mute(false),
        )
        .with_default(selectors::DEFAULT_INPUT_DEVICE, 1)
        .with_default(selectors::DEFAULT_OUTPUT_DEVICE, 2)
        .with_default(selectors::DEFAULT_SYSTEM_OUTPUT_DEVICE, 2)
}
