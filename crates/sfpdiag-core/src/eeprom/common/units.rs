//! Fixed-point conversions for A2h diagnostic words.
//!
//! All words are big-endian. Temperature is a signed q8.8 value; voltage,
//! bias and optical power are unsigned counts of their LSB; TEC current is a
//! signed count of 0.1 mA.

use serde::Serialize;

/// Floor reported for received or transmitted power of 0 µW or less.
pub const POWER_FLOOR_DBM: f64 = -40.0;

pub fn temperature_c(raw: u16) -> f64 {
    f64::from(raw as i16) / 256.0
}

pub fn voltage_v(raw: u16) -> f64 {
    f64::from(raw) * 0.0001
}

/// Laser bias current in microamps (2 µA per LSB).
pub fn bias_ua(raw: u16) -> f64 {
    f64::from(raw) * 2.0
}

pub fn power_uw(raw: u16) -> f64 {
    f64::from(raw) * 0.1
}

pub fn tec_current_ma(raw: u16) -> f64 {
    f64::from(raw as i16) * 0.1
}

/// Converts optical power in µW to dBm.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::common::units::power_dbm;
///
/// assert_eq!(power_dbm(0.0), -40.0);
/// assert!((power_dbm(100.0) - -10.0).abs() < 1e-9);
/// ```
pub fn power_dbm(power_uw: f64) -> f64 {
    if power_uw <= 0.0 {
        POWER_FLOOR_DBM
    } else {
        10.0 * (power_uw / 1000.0).log10()
    }
}

/// Physical quantity carried by a diagnostic word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Temperature,
    Voltage,
    Bias,
    Power,
    TecCurrent,
}

impl Quantity {
    pub fn scale(self, raw: u16) -> f64 {
        match self {
            Quantity::Temperature => temperature_c(raw),
            Quantity::Voltage => voltage_v(raw),
            Quantity::Bias => bias_ua(raw),
            Quantity::Power => power_uw(raw),
            Quantity::TecCurrent => tec_current_ma(raw),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Voltage => "V",
            Quantity::Bias => "µA",
            Quantity::Power => "µW",
            Quantity::TecCurrent => "mA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn temperature_is_signed_q8_8() {
        assert_eq!(temperature_c(0x1900), 25.0);
        assert_eq!(temperature_c(0xFF00), -1.0);
        assert_eq!(temperature_c(0x0080), 0.5);
    }

    #[test]
    fn voltage_bias_and_power_lsb() {
        assert!(close(voltage_v(33000), 3.3));
        assert_eq!(bias_ua(3000), 6000.0);
        assert!(close(power_uw(5000), 500.0));
    }

    #[test]
    fn tec_current_is_signed() {
        assert!(close(tec_current_ma(0xFFF6), -1.0));
        assert!(close(tec_current_ma(25), 2.5));
    }

    #[test]
    fn power_dbm_floors_non_positive_values() {
        assert_eq!(power_dbm(0.0), POWER_FLOOR_DBM);
        assert_eq!(power_dbm(-3.0), POWER_FLOOR_DBM);
        assert!(close(power_dbm(100.0), -10.0));
        assert!(close(power_dbm(1000.0), 0.0));
    }

    #[test]
    fn quantity_dispatches_to_scale_functions() {
        assert_eq!(Quantity::Temperature.scale(0x1900), 25.0);
        assert_eq!(Quantity::Bias.scale(1), 2.0);
        assert_eq!(Quantity::Power.unit(), "µW");
    }
}
