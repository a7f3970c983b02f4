use serde::Serialize;

const PRINTABLE_FIRST: u8 = 0x20;
const PRINTABLE_LAST: u8 = 0x7e;
const PAD: u8 = b' ';

/// Fixed-width, space-padded ASCII field (vendor name, part number, ...).
///
/// Invalid fields are kept with non-printable bytes replaced by `.` so that
/// callers can still show what the module reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AsciiField {
    /// Content without trailing padding.
    pub text: String,
    pub valid: bool,
}

impl AsciiField {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Checks the fixed-field invariant: printable ASCII only, left-justified
/// content, padding is one contiguous run of spaces up to the end, and the
/// content is not empty.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::common::is_valid_fixed_ascii;
///
/// assert!(is_valid_fixed_ascii(b"CISCO-SFP-10G   "));
/// assert!(!is_valid_fixed_ascii(b"CISCO SFP-10G   "));
/// assert!(!is_valid_fixed_ascii(b"                "));
/// ```
pub fn is_valid_fixed_ascii(bytes: &[u8]) -> bool {
    if bytes
        .iter()
        .any(|byte| !(PRINTABLE_FIRST..=PRINTABLE_LAST).contains(byte))
    {
        return false;
    }
    let content_len = bytes
        .iter()
        .position(|byte| *byte == PAD)
        .unwrap_or(bytes.len());
    if content_len == 0 {
        return false;
    }
    bytes[content_len..].iter().all(|byte| *byte == PAD)
}

pub fn decode_ascii_field(bytes: &[u8]) -> AsciiField {
    let valid = is_valid_fixed_ascii(bytes);
    let text: String = bytes
        .iter()
        .map(|byte| {
            if (PRINTABLE_FIRST..=PRINTABLE_LAST).contains(byte) {
                char::from(*byte)
            } else {
                '.'
            }
        })
        .collect();
    AsciiField {
        text: text.trim_end_matches(char::from(PAD)).to_string(),
        valid,
    }
}
