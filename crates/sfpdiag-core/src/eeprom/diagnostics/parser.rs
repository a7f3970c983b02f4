use serde::Serialize;

use crate::eeprom::common::units::{Quantity, power_dbm};
use crate::eeprom::common::{ChecksumField, checksum_field};
use crate::eeprom::identity::CalibrationKind;

use super::error::DiagnosticError;
use super::flags::{StatusControlFlags, ThresholdFlags};
use super::layout;
use super::reader::DiagnosticReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdLevel {
    Normal,
    WarningLow,
    WarningHigh,
    AlarmLow,
    AlarmHigh,
}

/// Four limits of one monitored quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThresholdSet {
    pub high_alarm: Option<f64>,
    pub low_alarm: Option<f64>,
    pub high_warning: Option<f64>,
    pub low_warning: Option<f64>,
}

impl ThresholdSet {
    fn read(reader: &DiagnosticReader<'_>, start: usize, quantity: Quantity) -> Self {
        let limit = |index: usize| reader.word(start + index * 2).map(|raw| quantity.scale(raw));
        Self {
            high_alarm: limit(0),
            low_alarm: limit(1),
            high_warning: limit(2),
            low_warning: limit(3),
        }
    }

    /// Places `value` against the limits; alarms win over warnings and
    /// missing limits never trigger.
    pub fn classify(&self, value: f64) -> ThresholdLevel {
        let above = |limit: Option<f64>| limit.is_some_and(|limit| value > limit);
        let below = |limit: Option<f64>| limit.is_some_and(|limit| value < limit);
        if above(self.high_alarm) {
            ThresholdLevel::AlarmHigh
        } else if below(self.low_alarm) {
            ThresholdLevel::AlarmLow
        } else if above(self.high_warning) {
            ThresholdLevel::WarningHigh
        } else if below(self.low_warning) {
            ThresholdLevel::WarningLow
        } else {
            ThresholdLevel::Normal
        }
    }
}

/// Alarm and warning thresholds (bytes 0..=55).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Thresholds {
    pub temperature_c: ThresholdSet,
    pub vcc_v: ThresholdSet,
    pub bias_ua: ThresholdSet,
    pub tx_power_uw: ThresholdSet,
    pub rx_power_uw: ThresholdSet,
    pub laser_temperature_c: ThresholdSet,
    pub tec_current_ma: ThresholdSet,
}

/// Bytes 56..=91, kept opaque. The calibration kind from A0h byte 92 says
/// which layout the bytes follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalibrationArea {
    ExternalCalibration { bytes: Vec<u8> },
    EnhancedFeatures { bytes: Vec<u8> },
}

impl Default for CalibrationArea {
    fn default() -> Self {
        CalibrationArea::EnhancedFeatures { bytes: Vec::new() }
    }
}

impl CalibrationArea {
    pub fn bytes(&self) -> &[u8] {
        match self {
            CalibrationArea::ExternalCalibration { bytes }
            | CalibrationArea::EnhancedFeatures { bytes } => bytes,
        }
    }
}

/// Live measurements (bytes 96..=109).
///
/// Fields are `None` when the page does not cover them. Values are only
/// authoritative when `data_ready` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RealtimeMeasurements {
    pub temperature_c: Option<f64>,
    pub vcc_v: Option<f64>,
    pub bias_ua: Option<f64>,
    pub tx_power_uw: Option<f64>,
    pub rx_power_uw: Option<f64>,
    /// Optional; laser temperature or wavelength depending on the module.
    pub laser_temperature_c: Option<f64>,
    /// Optional; TEC current.
    pub tec_current_ma: Option<f64>,
    pub tx_power_dbm: f64,
    pub rx_power_dbm: f64,
    pub data_ready: bool,
}

/// Page select byte 127; names the table mapped at 128..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSelect {
    /// Pages 00h and 01h: user writable EEPROM.
    UserEeprom(u8),
    /// Page 02h: tunability and receiver power monitoring.
    Tunability,
    /// Page 03h: high accuracy timing.
    HighAccuracyTiming,
    Unknown(u8),
}

impl Default for PageSelect {
    fn default() -> Self {
        PageSelect::UserEeprom(0)
    }
}

impl PageSelect {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 | 0x01 => PageSelect::UserEeprom(code),
            0x02 => PageSelect::Tunability,
            0x03 => PageSelect::HighAccuracyTiming,
            other => PageSelect::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageSelect::UserEeprom(_) => "User EEPROM",
            PageSelect::Tunability => "Tunability / RPM",
            PageSelect::HighAccuracyTiming => "High accuracy timing",
            PageSelect::Unknown(_) => "Unknown",
        }
    }
}

/// Opaque upper half of A2h tagged by the page select byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedBlock {
    pub page: PageSelect,
    pub bytes: Vec<u8>,
}

/// Pass-through control bytes (114, 115, 118..=119).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlBytes {
    pub tx_equalization: u8,
    pub rx_emphasis: u8,
    pub extended_status_control: [u8; 2],
}

/// Decoded A2h page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub thresholds: Thresholds,
    pub calibration: CalibrationArea,
    pub checksum: ChecksumField,
    pub realtime: RealtimeMeasurements,
    pub status: StatusControlFlags,
    pub alarms: ThresholdFlags,
    pub warnings: ThresholdFlags,
    pub control: ControlBytes,
    pub vendor_bytes: Vec<u8>,
    pub page_select: PageSelect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paged: Option<PagedBlock>,
}

impl Diagnostics {
    pub fn data_ready(&self) -> bool {
        self.realtime.data_ready
    }
}

/// Decodes the A2h page. Never fails: missing words become `None`, missing
/// flag bytes read as zero.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::diagnostics::decode_diagnostics;
/// use sfpdiag_core::eeprom::identity::CalibrationKind;
///
/// let mut page = [0u8; 128];
/// page[96..98].copy_from_slice(&0x1900u16.to_be_bytes());
/// let diag = decode_diagnostics(&page, CalibrationKind::Internal);
/// assert_eq!(diag.realtime.temperature_c, Some(25.0));
/// assert!(diag.realtime.data_ready);
/// ```
pub fn decode_diagnostics(page: &[u8], calibration: CalibrationKind) -> Diagnostics {
    let reader = DiagnosticReader::new(page);
    if let Err(err) = reader.require_len(layout::MIN_LEN) {
        log::debug!("diagnostics decoded with defaults: {err}");
    }

    let status = StatusControlFlags::from_raw(reader.byte_or_zero(layout::STATUS_CONTROL_OFFSET));
    // A missing status byte cannot vouch for the realtime block.
    let data_ready = reader.read_u8(layout::STATUS_CONTROL_OFFSET).is_ok() && status.data_ready();
    let page_select = PageSelect::from_code(reader.byte_or_zero(layout::PAGE_SELECT_OFFSET));

    Diagnostics {
        thresholds: decode_thresholds(&reader),
        calibration: decode_calibration(&reader, calibration),
        checksum: checksum_field(page, 0, layout::DMI_CHECKSUM_END, layout::CC_DMI_OFFSET),
        realtime: decode_realtime(&reader, data_ready),
        status,
        alarms: ThresholdFlags::from_raw(flag_pair(&reader, layout::ALARM_FLAGS_RANGE.start)),
        warnings: ThresholdFlags::from_raw(flag_pair(&reader, layout::WARNING_FLAGS_RANGE.start)),
        control: ControlBytes {
            tx_equalization: reader.byte_or_zero(layout::TX_EQUALIZATION_OFFSET),
            rx_emphasis: reader.byte_or_zero(layout::RX_EMPHASIS_OFFSET),
            extended_status_control: flag_pair(&reader, layout::EXT_STATUS_CONTROL_RANGE.start),
        },
        vendor_bytes: reader.bytes_or_empty(layout::VENDOR_RANGE),
        page_select,
        paged: reader
            .read_slice(layout::PAGED_RANGE)
            .ok()
            .map(|bytes| PagedBlock {
                page: page_select,
                bytes: bytes.to_vec(),
            }),
    }
}

/// Like [`decode_diagnostics`], but rejects pages shorter than 128 bytes.
pub fn try_decode_diagnostics(
    page: &[u8],
    calibration: CalibrationKind,
) -> Result<Diagnostics, DiagnosticError> {
    DiagnosticReader::new(page).require_len(layout::MIN_LEN)?;
    Ok(decode_diagnostics(page, calibration))
}

fn decode_thresholds(reader: &DiagnosticReader<'_>) -> Thresholds {
    Thresholds {
        temperature_c: ThresholdSet::read(reader, layout::TEMPERATURE_THRESHOLDS, Quantity::Temperature),
        vcc_v: ThresholdSet::read(reader, layout::VCC_THRESHOLDS, Quantity::Voltage),
        bias_ua: ThresholdSet::read(reader, layout::BIAS_THRESHOLDS, Quantity::Bias),
        tx_power_uw: ThresholdSet::read(reader, layout::TX_POWER_THRESHOLDS, Quantity::Power),
        rx_power_uw: ThresholdSet::read(reader, layout::RX_POWER_THRESHOLDS, Quantity::Power),
        laser_temperature_c: ThresholdSet::read(
            reader,
            layout::LASER_TEMPERATURE_THRESHOLDS,
            Quantity::Temperature,
        ),
        tec_current_ma: ThresholdSet::read(
            reader,
            layout::TEC_CURRENT_THRESHOLDS,
            Quantity::TecCurrent,
        ),
    }
}

fn decode_calibration(reader: &DiagnosticReader<'_>, kind: CalibrationKind) -> CalibrationArea {
    let bytes = reader.bytes_or_empty(layout::CALIBRATION_RANGE);
    match kind {
        CalibrationKind::External => CalibrationArea::ExternalCalibration { bytes },
        CalibrationKind::Internal | CalibrationKind::None => {
            CalibrationArea::EnhancedFeatures { bytes }
        }
    }
}

fn decode_realtime(reader: &DiagnosticReader<'_>, data_ready: bool) -> RealtimeMeasurements {
    let value = |range: std::ops::Range<usize>, quantity: Quantity| {
        reader.word(range.start).map(|raw| quantity.scale(raw))
    };
    let tx_power_uw = value(layout::TX_POWER_RANGE, Quantity::Power);
    let rx_power_uw = value(layout::RX_POWER_RANGE, Quantity::Power);
    RealtimeMeasurements {
        temperature_c: value(layout::TEMPERATURE_RANGE, Quantity::Temperature),
        vcc_v: value(layout::VCC_RANGE, Quantity::Voltage),
        bias_ua: value(layout::BIAS_RANGE, Quantity::Bias),
        tx_power_uw,
        rx_power_uw,
        laser_temperature_c: value(layout::LASER_TEMPERATURE_RANGE, Quantity::Temperature),
        tec_current_ma: value(layout::TEC_CURRENT_RANGE, Quantity::TecCurrent),
        tx_power_dbm: power_dbm(tx_power_uw.unwrap_or(0.0)),
        rx_power_dbm: power_dbm(rx_power_uw.unwrap_or(0.0)),
        data_ready,
    }
}

fn flag_pair(reader: &DiagnosticReader<'_>, start: usize) -> [u8; 2] {
    [reader.byte_or_zero(start), reader.byte_or_zero(start + 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::common::checksum::compute;

    fn close(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|value| (value - expected).abs() < 1e-6)
    }

    fn put(page: &mut [u8], offset: usize, raw: u16) {
        page[offset..offset + 2].copy_from_slice(&raw.to_be_bytes());
    }

    fn sample_page() -> Vec<u8> {
        let mut page = vec![0u8; layout::PAGE_LEN];
        // Temperature: 75 / -5 / 70 / 0 °C.
        put(&mut page, 0, 75 * 256);
        put(&mut page, 2, (-5i16 * 256) as u16);
        put(&mut page, 4, 70 * 256);
        put(&mut page, 6, 0);
        // Vcc: 3.6 / 3.0 / 3.5 / 3.1 V.
        put(&mut page, 8, 36000);
        put(&mut page, 10, 30000);
        put(&mut page, 12, 35000);
        put(&mut page, 14, 31000);
        // Rx power: 1000 / 10 / 800 / 20 µW.
        put(&mut page, 32, 10000);
        put(&mut page, 34, 100);
        put(&mut page, 36, 8000);
        put(&mut page, 38, 200);
        page[layout::CALIBRATION_RANGE.start] = 0x3F;
        page[layout::CC_DMI_OFFSET] = compute(&page, 0, layout::DMI_CHECKSUM_END).unwrap();

        put(&mut page, 96, 0x1900);
        put(&mut page, 98, 33000);
        put(&mut page, 100, 3000);
        put(&mut page, 102, 5000);
        put(&mut page, 104, 1000);
        put(&mut page, 108, 0xFFEC);
        page[layout::STATUS_CONTROL_OFFSET] = 0x02;
        page[layout::ALARM_FLAGS_RANGE.start] = 0x80;
        page[layout::WARNING_FLAGS_RANGE.start + 1] = 0x40;
        page[layout::TX_EQUALIZATION_OFFSET] = 0x11;
        page[layout::PAGE_SELECT_OFFSET] = 0x02;
        page[200] = 0xAB;
        page
    }

    #[test]
    fn decodes_thresholds_with_scale_functions() {
        let diag = decode_diagnostics(&sample_page(), CalibrationKind::Internal);
        let temperature = diag.thresholds.temperature_c;
        assert_eq!(temperature.high_alarm, Some(75.0));
        assert_eq!(temperature.low_alarm, Some(-5.0));
        assert!(close(diag.thresholds.vcc_v.high_alarm, 3.6));
        assert!(close(diag.thresholds.rx_power_uw.low_warning, 20.0));
        assert_eq!(diag.thresholds.tec_current_ma.high_alarm, Some(0.0));
        assert!(diag.checksum.valid);
    }

    #[test]
    fn negative_threshold_is_a_value_not_an_error() {
        let diag = decode_diagnostics(&sample_page(), CalibrationKind::Internal);
        assert_eq!(diag.thresholds.temperature_c.low_alarm, Some(-5.0));
        let short = decode_diagnostics(&sample_page()[..3], CalibrationKind::Internal);
        assert_eq!(short.thresholds.temperature_c.high_alarm, Some(75.0));
        assert_eq!(short.thresholds.temperature_c.low_alarm, None);
    }

    #[test]
    fn decodes_realtime_block() {
        let diag = decode_diagnostics(&sample_page(), CalibrationKind::Internal);
        let realtime = diag.realtime;
        assert_eq!(realtime.temperature_c, Some(25.0));
        assert!(close(realtime.vcc_v, 3.3));
        assert_eq!(realtime.bias_ua, Some(6000.0));
        assert!(close(realtime.tx_power_uw, 500.0));
        assert!(close(realtime.rx_power_uw, 100.0));
        assert!((realtime.rx_power_dbm - -10.0).abs() < 1e-9);
        assert!(close(realtime.tec_current_ma, -2.0));
        assert_eq!(realtime.laser_temperature_c, Some(0.0));
        assert!(realtime.data_ready);
        assert!(diag.status.rx_los_state);
    }

    #[test]
    fn zero_rx_power_floors_dbm() {
        let mut page = sample_page();
        put(&mut page, 104, 0);
        let diag = decode_diagnostics(&page, CalibrationKind::Internal);
        assert_eq!(diag.realtime.rx_power_dbm, -40.0);
    }

    #[test]
    fn data_not_ready_bit_clears_gate() {
        let mut page = sample_page();
        page[layout::STATUS_CONTROL_OFFSET] = 0x01;
        let diag = decode_diagnostics(&page, CalibrationKind::Internal);
        assert!(!diag.data_ready());
        assert!(diag.status.data_not_ready);
        assert_eq!(diag.realtime.temperature_c, Some(25.0));
    }

    #[test]
    fn calibration_area_follows_calibration_kind() {
        let page = sample_page();
        let external = decode_diagnostics(&page, CalibrationKind::External);
        assert!(matches!(
            external.calibration,
            CalibrationArea::ExternalCalibration { .. }
        ));
        assert_eq!(external.calibration.bytes().len(), 36);
        assert_eq!(external.calibration.bytes()[0], 0x3F);
        let internal = decode_diagnostics(&page, CalibrationKind::Internal);
        assert!(matches!(
            internal.calibration,
            CalibrationArea::EnhancedFeatures { .. }
        ));
    }

    #[test]
    fn flags_and_control_bytes_pass_through() {
        let diag = decode_diagnostics(&sample_page(), CalibrationKind::None);
        assert!(diag.alarms.temperature_high);
        assert_eq!(diag.alarms.raw, [0x80, 0x00]);
        assert!(diag.warnings.rx_power_low);
        assert_eq!(diag.control.tx_equalization, 0x11);
        assert_eq!(diag.vendor_bytes.len(), 7);
    }

    #[test]
    fn paged_block_is_tagged_by_page_select() {
        let diag = decode_diagnostics(&sample_page(), CalibrationKind::None);
        assert_eq!(diag.page_select, PageSelect::Tunability);
        let paged = diag.paged.expect("paged block");
        assert_eq!(paged.page, PageSelect::Tunability);
        assert_eq!(paged.bytes.len(), 128);
        assert_eq!(paged.bytes[200 - 128], 0xAB);

        let lower_only = decode_diagnostics(&sample_page()[..128], CalibrationKind::None);
        assert!(lower_only.paged.is_none());
    }

    #[test]
    fn page_select_codes() {
        assert_eq!(PageSelect::from_code(0x00), PageSelect::UserEeprom(0));
        assert_eq!(PageSelect::from_code(0x01), PageSelect::UserEeprom(1));
        assert_eq!(PageSelect::from_code(0x03), PageSelect::HighAccuracyTiming);
        assert_eq!(PageSelect::from_code(0x7F), PageSelect::Unknown(0x7F));
    }

    #[test]
    fn classify_prefers_alarms() {
        let set = ThresholdSet {
            high_alarm: Some(75.0),
            low_alarm: Some(-5.0),
            high_warning: Some(70.0),
            low_warning: Some(0.0),
        };
        assert_eq!(set.classify(25.0), ThresholdLevel::Normal);
        assert_eq!(set.classify(72.0), ThresholdLevel::WarningHigh);
        assert_eq!(set.classify(80.0), ThresholdLevel::AlarmHigh);
        assert_eq!(set.classify(-1.0), ThresholdLevel::WarningLow);
        assert_eq!(set.classify(-6.0), ThresholdLevel::AlarmLow);
        assert_eq!(ThresholdSet::default().classify(1e6), ThresholdLevel::Normal);
    }

    #[test]
    fn empty_page_never_reports_ready() {
        let diag = decode_diagnostics(&[], CalibrationKind::None);
        assert!(!diag.data_ready());
        assert_eq!(diag.realtime.temperature_c, None);
        assert_eq!(diag.realtime.rx_power_dbm, -40.0);
        assert!(!diag.checksum.valid);
        assert!(try_decode_diagnostics(&[0u8; 100], CalibrationKind::None).is_err());
    }
}
