use std::collections::BTreeMap;

use super::{SourceError, TwoWireBus};

#[derive(Debug, Clone, Default)]
struct Device {
    bytes: Vec<u8>,
    pointer: usize,
}

/// In-memory EEPROM devices behind a [`TwoWireBus`].
///
/// Each device keeps its own address pointer, which a burst read advances.
/// Reading past the end of a device yields a short burst.
#[derive(Debug, Clone, Default)]
pub struct MemoryBus {
    devices: BTreeMap<u8, Device>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, address: u8, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(address, bytes);
        self
    }

    pub fn insert(&mut self, address: u8, bytes: impl Into<Vec<u8>>) {
        self.devices.insert(
            address,
            Device {
                bytes: bytes.into(),
                pointer: 0,
            },
        );
    }

    pub fn contains(&self, address: u8) -> bool {
        self.devices.contains_key(&address)
    }

    /// Contents of a device, for inspection in tests and renderers.
    pub fn contents(&self, address: u8) -> Option<&[u8]> {
        self.devices.get(&address).map(|device| device.bytes.as_slice())
    }

    fn device_mut(&mut self, address: u8) -> Result<&mut Device, SourceError> {
        self.devices
            .get_mut(&address)
            .ok_or(SourceError::UnknownDevice(address))
    }
}

impl TwoWireBus for MemoryBus {
    fn write_offset(&mut self, device: u8, offset: u8) -> Result<(), SourceError> {
        self.device_mut(device)?.pointer = usize::from(offset);
        Ok(())
    }

    fn read_burst(&mut self, device: u8, buf: &mut [u8]) -> Result<usize, SourceError> {
        let device = self.device_mut(device)?;
        let available = device.bytes.get(device.pointer..).unwrap_or_default();
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        device.pointer += count;
        Ok(count)
    }
}
