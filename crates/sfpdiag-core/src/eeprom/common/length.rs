//! Link-length and cable-attenuation fields (A0h bytes 14..=19).
//!
//! Every length byte shares the same sentinel policy: `0x00` means the
//! length is not specified for that medium, `0xFF` means the real value
//! exceeds what the byte can express, and anything in between is a count of
//! media-specific units. The unit depends on whether the module declares a
//! copper cable (byte 8 bits 2/3); the profile of each offset carries both.

use std::fmt;

use serde::Serialize;

pub const NOT_SUPPORTED_RAW: u8 = 0x00;
pub const EXTENDED_RAW: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Decibels,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Decibels => "dB",
        }
    }
}

/// Decoded length byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LengthField {
    #[default]
    NotSupported,
    Valid {
        value: f64,
        unit: LengthUnit,
    },
    /// The real length is at least `lower_bound`.
    Extended {
        lower_bound: f64,
        unit: LengthUnit,
    },
}

impl LengthField {
    /// Numeric value, 0 when not supported.
    pub fn value(&self) -> f64 {
        match self {
            LengthField::NotSupported => 0.0,
            LengthField::Valid { value, .. } => *value,
            LengthField::Extended { lower_bound, .. } => *lower_bound,
        }
    }

    pub fn unit(&self) -> Option<LengthUnit> {
        match self {
            LengthField::NotSupported => None,
            LengthField::Valid { unit, .. } | LengthField::Extended { unit, .. } => Some(*unit),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, LengthField::NotSupported)
    }
}

impl fmt::Display for LengthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthField::NotSupported => write!(f, "not supported"),
            LengthField::Valid { value, unit } => write!(f, "{value} {}", unit.symbol()),
            LengthField::Extended { lower_bound, unit } => {
                write!(f, "> {lower_bound} {}", unit.symbol())
            }
        }
    }
}

/// Unit applied to one medium of a length byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthScale {
    pub unit: LengthUnit,
    /// Physical value of one raw count.
    pub step: f64,
    /// Value reported when the raw byte is `0xFF`.
    pub extended_floor: f64,
}

/// Optical and copper interpretation of one length offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthProfile {
    pub optical: LengthScale,
    pub copper: LengthScale,
}

impl LengthProfile {
    pub fn scale(&self, is_copper: bool) -> LengthScale {
        if is_copper { self.copper } else { self.optical }
    }
}

const TEN_METERS: LengthScale = LengthScale {
    unit: LengthUnit::Meters,
    step: 10.0,
    extended_floor: 2540.0,
};

/// OM1 (byte 17) and OM2 (byte 16): 10 m units on both media.
pub const MULTIMODE: LengthProfile = LengthProfile {
    optical: TEN_METERS,
    copper: TEN_METERS,
};

/// OM4 (byte 18): 10 m units for fiber, 1 m units for copper cable length.
pub const OM4_OR_COPPER: LengthProfile = LengthProfile {
    optical: TEN_METERS,
    copper: LengthScale {
        unit: LengthUnit::Meters,
        step: 1.0,
        extended_floor: 254.0,
    },
};

/// OM3 (byte 19): 10 m units for fiber; cable assemblies reuse the copper
/// length scale of byte 18.
pub const OM3_OR_CABLE: LengthProfile = OM4_OR_COPPER;

/// SMF (byte 14): kilometers for fiber, 0.5 dB attenuation steps at 12.9 GHz
/// for copper.
pub const SMF_KM_OR_ATTENUATION: LengthProfile = LengthProfile {
    optical: LengthScale {
        unit: LengthUnit::Kilometers,
        step: 1.0,
        extended_floor: 254.0,
    },
    copper: LengthScale {
        unit: LengthUnit::Decibels,
        step: 0.5,
        extended_floor: 127.0,
    },
};

/// SMF (byte 15): 100 m units for fiber, 1 dB attenuation steps at
/// 25.78 GHz for copper.
pub const SMF_100M_OR_ATTENUATION: LengthProfile = LengthProfile {
    optical: LengthScale {
        unit: LengthUnit::Meters,
        step: 100.0,
        extended_floor: 25400.0,
    },
    copper: LengthScale {
        unit: LengthUnit::Decibels,
        step: 1.0,
        extended_floor: 254.0,
    },
};

/// Decodes one length byte for the given medium.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::common::length::{LengthField, LengthUnit, MULTIMODE, decode_length};
///
/// assert_eq!(
///     decode_length(0x0A, false, &MULTIMODE),
///     LengthField::Valid { value: 100.0, unit: LengthUnit::Meters }
/// );
/// ```
pub fn decode_length(raw: u8, is_copper: bool, profile: &LengthProfile) -> LengthField {
    let scale = profile.scale(is_copper);
    match raw {
        NOT_SUPPORTED_RAW => LengthField::NotSupported,
        EXTENDED_RAW => LengthField::Extended {
            lower_bound: scale.extended_floor,
            unit: scale.unit,
        },
        count => LengthField::Valid {
            value: f64::from(count) * scale.step,
            unit: scale.unit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: [LengthProfile; 4] = [
        MULTIMODE,
        OM4_OR_COPPER,
        SMF_KM_OR_ATTENUATION,
        SMF_100M_OR_ATTENUATION,
    ];

    #[test]
    fn om2_examples() {
        assert_eq!(
            decode_length(0x0A, false, &MULTIMODE),
            LengthField::Valid {
                value: 100.0,
                unit: LengthUnit::Meters
            }
        );
        assert_eq!(
            decode_length(0xFF, false, &MULTIMODE),
            LengthField::Extended {
                lower_bound: 2540.0,
                unit: LengthUnit::Meters
            }
        );
        let none = decode_length(0x00, false, &MULTIMODE);
        assert_eq!(none, LengthField::NotSupported);
        assert_eq!(none.value(), 0.0);
    }

    #[test]
    fn zero_is_not_supported_on_every_profile_and_medium() {
        for profile in PROFILES {
            for copper in [false, true] {
                assert_eq!(
                    decode_length(0, copper, &profile),
                    LengthField::NotSupported
                );
            }
        }
    }

    #[test]
    fn valid_range_scales_by_medium() {
        for profile in PROFILES {
            for copper in [false, true] {
                let scale = profile.scale(copper);
                for raw in 1..=254u8 {
                    let field = decode_length(raw, copper, &profile);
                    assert_eq!(
                        field,
                        LengthField::Valid {
                            value: f64::from(raw) * scale.step,
                            unit: scale.unit
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn om4_copper_uses_meter_units() {
        assert_eq!(
            decode_length(3, true, &OM4_OR_COPPER),
            LengthField::Valid {
                value: 3.0,
                unit: LengthUnit::Meters
            }
        );
        assert_eq!(decode_length(0xFF, true, &OM4_OR_COPPER).value(), 254.0);
        assert_eq!(decode_length(0xFF, false, &OM4_OR_COPPER).value(), 2540.0);
    }

    #[test]
    fn smf_copper_reads_attenuation() {
        let field = decode_length(9, true, &SMF_KM_OR_ATTENUATION);
        assert_eq!(field.unit(), Some(LengthUnit::Decibels));
        assert_eq!(field.value(), 4.5);
        assert_eq!(decode_length(0xFF, true, &SMF_KM_OR_ATTENUATION).value(), 127.0);
        assert_eq!(decode_length(40, false, &SMF_KM_OR_ATTENUATION).to_string(), "40 km");
    }

    #[test]
    fn display_marks_extended_lengths() {
        assert_eq!(decode_length(0xFF, false, &SMF_100M_OR_ATTENUATION).to_string(), "> 25400 m");
        assert_eq!(LengthField::NotSupported.to_string(), "not supported");
    }
}
