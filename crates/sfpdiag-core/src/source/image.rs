use std::fs;
use std::path::Path;

use super::{A0_DEVICE, A2_DEVICE, MemoryBus, SourceError, TwoWireBus};

/// Size of one device dump in an image file.
pub const DEVICE_IMAGE_LEN: usize = 256;

/// EEPROM image loaded from a raw dump (as written by `ethtool -m ... raw on`).
///
/// The first 256 bytes are A0h; an optional second 256 bytes are A2h.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    bus: MemoryBus,
    len: usize,
}

impl ImageFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SourceError> {
        let (a0, a2) = match bytes.len() {
            DEVICE_IMAGE_LEN => (bytes, None),
            len if len == DEVICE_IMAGE_LEN * 2 => {
                let (a0, a2) = bytes.split_at(DEVICE_IMAGE_LEN);
                (a0, Some(a2))
            }
            len => return Err(SourceError::InvalidImage { len }),
        };
        let mut bus = MemoryBus::new().with_device(A0_DEVICE, a0);
        if let Some(a2) = a2 {
            bus.insert(A2_DEVICE, a2);
        }
        Ok(Self {
            bus,
            len: bytes.len(),
        })
    }

    /// Image size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_diagnostics(&self) -> bool {
        self.bus.contains(A2_DEVICE)
    }

    pub fn into_bus(self) -> MemoryBus {
        self.bus
    }
}

impl TwoWireBus for ImageFileSource {
    fn write_offset(&mut self, device: u8, offset: u8) -> Result<(), SourceError> {
        self.bus.write_offset(device, offset)
    }

    fn read_burst(&mut self, device: u8, buf: &mut [u8]) -> Result<usize, SourceError> {
        self.bus.read_burst(device, buf)
    }
}
