mod image;
mod memory;

pub use image::ImageFileSource;
pub use memory::MemoryBus;

use thiserror::Error;

/// Two-wire address of the identity page (A0h).
pub const A0_DEVICE: u8 = 0x50;
/// Two-wire address of the diagnostic page (A2h).
pub const A2_DEVICE: u8 = 0x51;

/// Raw access to the module's two-wire bus.
///
/// A read is two transactions: set the device's internal address pointer,
/// then burst-read from it. Implementations report how many bytes the
/// burst actually produced; [`read_block`] turns a short burst into an
/// error so decoders never see a partial page.
pub trait TwoWireBus {
    fn write_offset(&mut self, device: u8, offset: u8) -> Result<(), SourceError>;
    fn read_burst(&mut self, device: u8, buf: &mut [u8]) -> Result<usize, SourceError>;
}

impl<B: TwoWireBus + ?Sized> TwoWireBus for &mut B {
    fn write_offset(&mut self, device: u8, offset: u8) -> Result<(), SourceError> {
        (**self).write_offset(device, offset)
    }

    fn read_burst(&mut self, device: u8, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read_burst(device, buf)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(
        "short read from device 0x{device:02X} at offset {offset}: requested {requested} bytes, got {received}"
    )]
    ShortRead {
        device: u8,
        offset: u8,
        requested: usize,
        received: usize,
    },
    #[error("no device at address 0x{0:02X}")]
    UnknownDevice(u8),
    #[error("invalid EEPROM image: {len} bytes (expected 256 or 512)")]
    InvalidImage { len: usize },
}

/// Reads `len` bytes starting at `offset` from `device`.
pub fn read_block<B: TwoWireBus + ?Sized>(
    bus: &mut B,
    device: u8,
    offset: u8,
    len: usize,
) -> Result<Vec<u8>, SourceError> {
    bus.write_offset(device, offset)?;
    let mut buf = vec![0u8; len];
    let received = bus.read_burst(device, &mut buf)?;
    if received < len {
        return Err(SourceError::ShortRead {
            device,
            offset,
            requested: len,
            received,
        });
    }
    Ok(buf)
}
