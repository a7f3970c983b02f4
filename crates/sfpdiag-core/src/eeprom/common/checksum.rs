use serde::Serialize;

/// Stored checksum byte together with the range it covers.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::common::checksum_field;
///
/// let mut page = [0u8; 64];
/// page[0] = 0x03;
/// page[1] = 0x04;
/// page[63] = 0x07;
/// let field = checksum_field(&page, 0, 62, 63);
/// assert!(field.valid);
/// assert_eq!(field.computed, 0x07);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecksumField {
    /// Byte read at the checksum offset (0 when absent).
    pub stored: u8,
    /// Truncated sum over the covered range (0 when the range is absent).
    pub computed: u8,
    /// First covered offset.
    pub start: usize,
    /// Last covered offset (inclusive).
    pub end: usize,
    /// Offset of the stored checksum byte.
    pub offset: usize,
    /// True when the range and checksum byte are present and match.
    pub valid: bool,
}

/// Sum of `buffer[start..=end_inclusive]` truncated to 8 bits.
pub fn compute(buffer: &[u8], start: usize, end_inclusive: usize) -> Option<u8> {
    if start > end_inclusive {
        return None;
    }
    let covered = buffer.get(start..=end_inclusive)?;
    Some(
        covered
            .iter()
            .fold(0u8, |acc, byte| acc.wrapping_add(*byte)),
    )
}

/// Returns true when the covered range sums to the byte at `checksum_offset`.
///
/// Short buffers and inverted ranges are never valid.
pub fn validate(
    buffer: &[u8],
    start: usize,
    end_inclusive: usize,
    checksum_offset: usize,
) -> bool {
    match (
        compute(buffer, start, end_inclusive),
        buffer.get(checksum_offset),
    ) {
        (Some(computed), Some(stored)) => computed == *stored,
        _ => false,
    }
}

pub fn checksum_field(
    buffer: &[u8],
    start: usize,
    end_inclusive: usize,
    checksum_offset: usize,
) -> ChecksumField {
    let computed = compute(buffer, start, end_inclusive);
    let stored = buffer.get(checksum_offset).copied();
    let valid = matches!((computed, stored), (Some(c), Some(s)) if c == s);
    if !valid {
        log::debug!(
            "checksum mismatch over [{start}, {end_inclusive}] -> {checksum_offset}: stored {stored:?}, computed {computed:?}"
        );
    }
    ChecksumField {
        stored: stored.unwrap_or(0),
        computed: computed.unwrap_or(0),
        start,
        end: end_inclusive,
        offset: checksum_offset,
        valid,
    }
}
