//! Leaf decoders shared by the A0h and A2h pages.

pub mod ascii;
pub mod checksum;
pub mod length;
pub mod units;

pub use ascii::{AsciiField, decode_ascii_field, is_valid_fixed_ascii};
pub use checksum::{ChecksumField, checksum_field, compute, validate};
pub use length::{LengthField, LengthProfile, LengthScale, LengthUnit, decode_length};

pub(crate) fn bit(byte: u8, position: u8) -> bool {
    byte & (1 << position) != 0
}
