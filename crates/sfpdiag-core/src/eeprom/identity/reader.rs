use std::ops::Range;

use super::error::IdentityError;
use super::layout;

pub struct IdentityReader<'a> {
    page: &'a [u8],
}

impl<'a> IdentityReader<'a> {
    pub fn new(page: &'a [u8]) -> Self {
        Self { page }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), IdentityError> {
        if self.page.len() < needed {
            return Err(IdentityError::TooShort {
                needed,
                actual: self.page.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, IdentityError> {
        self.page
            .get(offset)
            .copied()
            .ok_or(IdentityError::TooShort {
                needed: offset + 1,
                actual: self.page.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], IdentityError> {
        self.page
            .get(range.clone())
            .ok_or(IdentityError::TooShort {
                needed: range.end,
                actual: self.page.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, IdentityError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(IdentityError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Missing bytes read as zero, the "unknown" value of every A0h field.
    pub fn byte_or_zero(&self, offset: usize) -> u8 {
        self.read_u8(offset).unwrap_or(0)
    }

    /// Missing ranges read as an empty slice, which no ASCII field accepts.
    pub fn slice_or_empty(&self, range: Range<usize>) -> &'a [u8] {
        self.read_slice(range).unwrap_or(&[])
    }

    pub fn read_oui(&self) -> u32 {
        match self.read_slice(layout::VENDOR_OUI_RANGE) {
            Ok(bytes) => bytes
                .iter()
                .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
            Err(_) => 0,
        }
    }

    pub fn compliance_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        for (index, slot) in bytes.iter_mut().enumerate() {
            *slot = self.byte_or_zero(layout::COMPLIANCE_RANGE.start + index);
        }
        bytes
    }

    /// Passive (bit 2) or active (bit 3) cable asserted in byte 8.
    pub fn is_copper(&self) -> bool {
        let byte8 = self.byte_or_zero(layout::COMPLIANCE_RANGE.start + layout::CABLE_TECHNOLOGY_INDEX);
        byte8 & ((1 << layout::ACTIVE_CABLE_BIT) | (1 << layout::PASSIVE_CABLE_BIT)) != 0
    }
}
