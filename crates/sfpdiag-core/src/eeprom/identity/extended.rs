use serde::Serialize;

use crate::eeprom::common::{AsciiField, ChecksumField, bit, checksum_field, decode_ascii_field};

use super::codes::ComplianceRevision;
use super::error::IdentityError;
use super::layout;
use super::parser::SignalingRate;
use super::reader::IdentityReader;

/// Implemented optional signals (bytes 64..=65).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptionSignals {
    pub raw: u16,
    pub paging_implemented: bool,
    pub rate_select_implemented: bool,
    pub tx_disable_implemented: bool,
    pub tx_fault_implemented: bool,
    pub rx_los_inverted: bool,
    pub rx_los_implemented: bool,
}

impl OptionSignals {
    pub fn from_raw(raw: u16) -> Self {
        let [high, low] = raw.to_be_bytes();
        Self {
            raw,
            paging_implemented: bit(high, 4),
            rate_select_implemented: bit(low, 5),
            tx_disable_implemented: bit(low, 4),
            tx_fault_implemented: bit(low, 3),
            rx_los_inverted: bit(low, 2),
            rx_los_implemented: bit(low, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationKind {
    #[default]
    None,
    Internal,
    External,
}

/// Diagnostic monitoring type (byte 92).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticMonitoring {
    pub raw: u8,
    /// A2h is present; gates every diagnostic read.
    pub dmi_implemented: bool,
    pub calibration: CalibrationKind,
    /// Received power is average power (true) or OMA (false).
    pub rx_power_average: bool,
    /// A2h is only reachable after an address change sequence.
    pub address_change_required: bool,
}

impl DiagnosticMonitoring {
    pub fn from_raw(raw: u8) -> Self {
        let calibration = if bit(raw, layout::EXTERNAL_CALIBRATION_BIT) {
            CalibrationKind::External
        } else if bit(raw, layout::INTERNAL_CALIBRATION_BIT) {
            CalibrationKind::Internal
        } else {
            CalibrationKind::None
        };
        Self {
            raw,
            dmi_implemented: bit(raw, layout::DMI_IMPLEMENTED_BIT),
            calibration,
            rx_power_average: bit(raw, layout::RX_POWER_AVERAGE_BIT),
            address_change_required: bit(raw, layout::ADDRESS_CHANGE_BIT),
        }
    }
}

/// Enhanced options (byte 93).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnhancedOptions {
    pub raw: u8,
    pub alarm_warning_flags: bool,
    pub soft_tx_disable: bool,
    pub soft_tx_fault: bool,
    pub soft_rx_los: bool,
    pub soft_rate_select: bool,
    pub application_select_sff_8079: bool,
    pub soft_rate_select_sff_8431: bool,
}

impl EnhancedOptions {
    pub fn from_raw(raw: u8) -> Self {
        Self {
            raw,
            alarm_warning_flags: bit(raw, 7),
            soft_tx_disable: bit(raw, 6),
            soft_tx_fault: bit(raw, 5),
            soft_rx_los: bit(raw, 4),
            soft_rate_select: bit(raw, 3),
            application_select_sff_8079: bit(raw, 2),
            soft_rate_select_sff_8431: bit(raw, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufactureDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
}

/// Date code (bytes 84..=91): `YYMMDD` followed by an optional lot code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateCode {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<ManufactureDate>,
}

impl DateCode {
    pub fn parse(bytes: &[u8]) -> Self {
        let text: String = bytes
            .iter()
            .map(|byte| {
                if byte.is_ascii_graphic() || *byte == b' ' {
                    char::from(*byte)
                } else {
                    '.'
                }
            })
            .collect();
        Self {
            date: parse_date(bytes),
            text: text.trim_end().to_string(),
        }
    }
}

fn parse_date(bytes: &[u8]) -> Option<ManufactureDate> {
    let digits = bytes.get(0..6)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let pair = |index: usize| (digits[index] - b'0') * 10 + (digits[index + 1] - b'0');
    let (year, month, day) = (pair(0), pair(2), pair(4));
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let lot = bytes
        .get(6..8)
        .map(|lot| String::from_utf8_lossy(lot).trim().to_string())
        .filter(|lot| !lot.is_empty() && lot.chars().all(|c| c.is_ascii_graphic()));
    Some(ManufactureDate {
        year: 2000 + u16::from(year),
        month,
        day,
        lot,
    })
}

/// Extended identity record (A0h 64..=95).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtendedIdentity {
    pub options: OptionSignals,
    /// Upper rate margin in percent, or the nominal rate in 250 MBd units
    /// when byte 12 reads 0xFF.
    pub br_max: u8,
    /// Lower rate margin in percent.
    pub br_min: u8,
    pub serial_number: AsciiField,
    pub date_code: DateCode,
    pub monitoring: DiagnosticMonitoring,
    pub enhanced_options: EnhancedOptions,
    pub compliance_revision: ComplianceRevision,
    pub checksum: ChecksumField,
}

/// Decodes bytes 64..=95 of the A0h page. Offsets are absolute, so `page`
/// starts at byte 0.
pub fn decode_extended(page: &[u8]) -> ExtendedIdentity {
    let reader = IdentityReader::new(page);
    if let Err(err) = reader.require_len(layout::EXTENDED_LEN) {
        log::debug!("extended identity decoded with defaults: {err}");
    }

    ExtendedIdentity {
        options: OptionSignals::from_raw(reader.read_u16_be(layout::OPTIONS_RANGE).unwrap_or(0)),
        br_max: reader.byte_or_zero(layout::BR_MAX_OFFSET),
        br_min: reader.byte_or_zero(layout::BR_MIN_OFFSET),
        serial_number: decode_ascii_field(reader.slice_or_empty(layout::SERIAL_RANGE)),
        date_code: DateCode::parse(reader.slice_or_empty(layout::DATE_CODE_RANGE)),
        monitoring: DiagnosticMonitoring::from_raw(
            reader.byte_or_zero(layout::MONITORING_TYPE_OFFSET),
        ),
        enhanced_options: EnhancedOptions::from_raw(
            reader.byte_or_zero(layout::ENHANCED_OPTIONS_OFFSET),
        ),
        compliance_revision: ComplianceRevision::from_code(
            reader.byte_or_zero(layout::COMPLIANCE_REVISION_OFFSET),
        ),
        checksum: checksum_field(
            page,
            layout::EXTENDED_START,
            layout::EXTENDED_CHECKSUM_END,
            layout::CC_EXT_OFFSET,
        ),
    }
}

pub fn try_decode_extended(page: &[u8]) -> Result<ExtendedIdentity, IdentityError> {
    IdentityReader::new(page).require_len(layout::EXTENDED_LEN)?;
    Ok(decode_extended(page))
}

/// True when the module implements digital diagnostics, i.e. the A2h page
/// may be fetched and decoded.
pub fn diagnostics_available(extended: &ExtendedIdentity) -> bool {
    extended.monitoring.dmi_implemented
}

/// Nominal rate in MBd, following byte 66 when byte 12 is saturated.
///
/// Returns `None` when the rate is not specified or byte 66 is zero.
pub fn resolve_signaling_rate(rate: SignalingRate, extended: &ExtendedIdentity) -> Option<u32> {
    match rate {
        SignalingRate::NotSpecified => None,
        SignalingRate::Valid { mbd } => Some(mbd),
        SignalingRate::Extended { .. } if extended.br_max == 0 => None,
        SignalingRate::Extended { .. } => {
            Some(u32::from(extended.br_max) * layout::EXTENDED_RATE_UNIT_MBD)
        }
    }
}
