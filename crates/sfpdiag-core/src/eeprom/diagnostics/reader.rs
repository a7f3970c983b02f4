use std::ops::Range;

use super::error::DiagnosticError;

pub struct DiagnosticReader<'a> {
    page: &'a [u8],
}

impl<'a> DiagnosticReader<'a> {
    pub fn new(page: &'a [u8]) -> Self {
        Self { page }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DiagnosticError> {
        if self.page.len() < needed {
            return Err(DiagnosticError::TooShort {
                needed,
                actual: self.page.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DiagnosticError> {
        self.page
            .get(offset)
            .copied()
            .ok_or(DiagnosticError::TooShort {
                needed: offset + 1,
                actual: self.page.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DiagnosticError> {
        self.page
            .get(range.clone())
            .ok_or(DiagnosticError::TooShort {
                needed: range.end,
                actual: self.page.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DiagnosticError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(DiagnosticError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Big-endian word at `offset`, `None` when the page does not cover it.
    pub fn word(&self, offset: usize) -> Option<u16> {
        self.read_u16_be(offset..offset + 2).ok()
    }

    pub fn byte_or_zero(&self, offset: usize) -> u8 {
        self.read_u8(offset).unwrap_or(0)
    }

    pub fn bytes_or_empty(&self, range: Range<usize>) -> Vec<u8> {
        self.read_slice(range).map(<[u8]>::to_vec).unwrap_or_default()
    }
}
