use std::fmt;

use serde::Serialize;

use crate::eeprom::common::length::{self, LengthField, decode_length};
use crate::eeprom::common::{AsciiField, ChecksumField, bit, checksum_field, decode_ascii_field};

use super::codes::{Connector, Encoding, ExtendedCompliance, Identifier, RateIdentifier};
use super::compliance::{ComplianceFlags, decode_compliance, fc_speed_2};
use super::error::IdentityError;
use super::layout;
use super::reader::IdentityReader;

/// Nominal signaling rate (byte 12).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignalingRate {
    #[default]
    NotSpecified,
    Valid { mbd: u32 },
    /// Rate above 25.4 GBd; the real value sits in byte 66.
    Extended { mbd: u32 },
}

impl SignalingRate {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 => SignalingRate::NotSpecified,
            0xFF => SignalingRate::Extended {
                mbd: layout::NOMINAL_RATE_EXTENDED_MBD,
            },
            units => SignalingRate::Valid {
                mbd: u32::from(units) * layout::NOMINAL_RATE_UNIT_MBD,
            },
        }
    }

    pub fn mbd(&self) -> u32 {
        match self {
            SignalingRate::NotSpecified => 0,
            SignalingRate::Valid { mbd } | SignalingRate::Extended { mbd } => *mbd,
        }
    }
}

impl fmt::Display for SignalingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalingRate::NotSpecified => write!(f, "not specified"),
            SignalingRate::Valid { mbd } => write!(f, "{mbd} MBd"),
            SignalingRate::Extended { mbd } => write!(f, "> {mbd} MBd"),
        }
    }
}

/// Link lengths (bytes 14..=19), interpreted for the module's medium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LinkLengths {
    pub smf_km: LengthField,
    pub smf_100m: LengthField,
    pub om2: LengthField,
    pub om1: LengthField,
    pub om4_or_copper: LengthField,
    pub om3_or_cable: LengthField,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorInfo {
    pub name: AsciiField,
    /// IEEE company id, big-endian 24 bits.
    pub oui: u32,
    pub part_number: AsciiField,
    pub revision: AsciiField,
}

impl VendorInfo {
    pub fn oui_label(&self) -> String {
        let [_, a, b, c] = self.oui.to_be_bytes();
        format!("{a:02x}:{b:02x}:{c:02x}")
    }
}

/// Byte 60 for passive cables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassiveCableCompliance {
    pub raw: u8,
    pub sff_8431_appendix_e: bool,
    pub fc_pi_4_appendix_h: bool,
}

/// Byte 60 for active cables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveCableCompliance {
    pub raw: u8,
    pub sff_8431_appendix_e: bool,
    pub fc_pi_4_limiting: bool,
    pub sff_8431_limiting: bool,
}

/// Bytes 60..=61: laser wavelength for optics, cable compliance for
/// copper. Only the member selected by byte 8 is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaInfo {
    Optical { wavelength_nm: u16 },
    PassiveCable { compliance: PassiveCableCompliance },
    ActiveCable { compliance: ActiveCableCompliance },
}

impl Default for MediaInfo {
    fn default() -> Self {
        MediaInfo::Optical { wavelength_nm: 0 }
    }
}

impl MediaInfo {
    pub fn is_copper(&self) -> bool {
        !matches!(self, MediaInfo::Optical { .. })
    }
}

/// Base identity record (A0h 0..=63).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseIdentity {
    pub identifier: Identifier,
    pub extended_identifier: u8,
    /// Byte 1 equals 0x04 (two-wire ID).
    pub extended_identifier_valid: bool,
    pub connector: Connector,
    pub compliance: ComplianceFlags,
    pub encoding: Encoding,
    pub nominal_rate: SignalingRate,
    pub rate_identifier: RateIdentifier,
    pub lengths: LinkLengths,
    pub vendor: VendorInfo,
    pub extended_compliance: ExtendedCompliance,
    pub media: MediaInfo,
    pub fc_speed_2_raw: u8,
    /// 64GFC support; `None` unless byte 10 sets "see byte 62".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fc_speed_2: Option<bool>,
    pub checksum: ChecksumField,
}

impl BaseIdentity {
    pub fn is_copper(&self) -> bool {
        self.media.is_copper()
    }
}

/// Decodes the base identity, falling back to zero/unknown values for any
/// byte the buffer does not cover.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::identity::{Identifier, decode_base};
///
/// let mut page = [0u8; 64];
/// page[0] = 0x03;
/// let base = decode_base(&page);
/// assert_eq!(base.identifier, Identifier::Sfp);
/// assert!(!base.checksum.valid);
/// ```
pub fn decode_base(page: &[u8]) -> BaseIdentity {
    let reader = IdentityReader::new(page);
    if let Err(err) = reader.require_len(layout::BASE_LEN) {
        log::debug!("base identity decoded with defaults: {err}");
    }

    let is_copper = reader.is_copper();
    let compliance = decode_compliance(reader.compliance_bytes());
    let extended_identifier = reader.byte_or_zero(layout::EXT_IDENTIFIER_OFFSET);
    let fc_speed_2_raw = reader.byte_or_zero(layout::FC_SPEED_2_OFFSET);

    BaseIdentity {
        identifier: Identifier::from_code(reader.byte_or_zero(layout::IDENTIFIER_OFFSET)),
        extended_identifier,
        extended_identifier_valid: extended_identifier == layout::SFP_EXT_IDENTIFIER,
        connector: Connector::from_code(reader.byte_or_zero(layout::CONNECTOR_OFFSET)),
        encoding: Encoding::from_code(reader.byte_or_zero(layout::ENCODING_OFFSET)),
        nominal_rate: SignalingRate::from_raw(reader.byte_or_zero(layout::NOMINAL_RATE_OFFSET)),
        rate_identifier: RateIdentifier::from_code(
            reader.byte_or_zero(layout::RATE_IDENTIFIER_OFFSET),
        ),
        lengths: decode_lengths(&reader, is_copper),
        vendor: VendorInfo {
            name: decode_ascii_field(reader.slice_or_empty(layout::VENDOR_NAME_RANGE)),
            oui: reader.read_oui(),
            part_number: decode_ascii_field(reader.slice_or_empty(layout::VENDOR_PN_RANGE)),
            revision: decode_ascii_field(reader.slice_or_empty(layout::VENDOR_REV_RANGE)),
        },
        extended_compliance: ExtendedCompliance::from_code(
            reader.byte_or_zero(layout::EXT_COMPLIANCE_OFFSET),
        ),
        media: decode_media(&reader, &compliance),
        fc_speed_2_raw,
        fc_speed_2: fc_speed_2(fc_speed_2_raw, &compliance.fc_speed),
        compliance,
        checksum: checksum_field(
            page,
            0,
            layout::BASE_CHECKSUM_END,
            layout::CC_BASE_OFFSET,
        ),
    }
}

/// Like [`decode_base`], but rejects pages shorter than 64 bytes.
pub fn try_decode_base(page: &[u8]) -> Result<BaseIdentity, IdentityError> {
    IdentityReader::new(page).require_len(layout::BASE_LEN)?;
    Ok(decode_base(page))
}

fn decode_lengths(reader: &IdentityReader<'_>, is_copper: bool) -> LinkLengths {
    let field = |offset: usize, profile: &length::LengthProfile| {
        decode_length(reader.byte_or_zero(offset), is_copper, profile)
    };
    LinkLengths {
        smf_km: field(layout::LENGTH_SMF_KM_OFFSET, &length::SMF_KM_OR_ATTENUATION),
        smf_100m: field(
            layout::LENGTH_SMF_100M_OFFSET,
            &length::SMF_100M_OR_ATTENUATION,
        ),
        om2: field(layout::LENGTH_OM2_OFFSET, &length::MULTIMODE),
        om1: field(layout::LENGTH_OM1_OFFSET, &length::MULTIMODE),
        om4_or_copper: field(layout::LENGTH_OM4_OR_COPPER_OFFSET, &length::OM4_OR_COPPER),
        om3_or_cable: field(layout::LENGTH_OM3_OR_CABLE_OFFSET, &length::OM3_OR_CABLE),
    }
}

fn decode_media(reader: &IdentityReader<'_>, compliance: &ComplianceFlags) -> MediaInfo {
    let technology = &compliance.fc_technology;
    if technology.active_cable {
        let raw = reader.byte_or_zero(layout::MEDIA_RANGE.start);
        return MediaInfo::ActiveCable {
            compliance: ActiveCableCompliance {
                raw,
                sff_8431_appendix_e: bit(raw, 0),
                fc_pi_4_limiting: bit(raw, 1),
                sff_8431_limiting: bit(raw, 2),
            },
        };
    }
    if technology.passive_cable {
        let raw = reader.byte_or_zero(layout::MEDIA_RANGE.start);
        return MediaInfo::PassiveCable {
            compliance: PassiveCableCompliance {
                raw,
                sff_8431_appendix_e: bit(raw, 0),
                fc_pi_4_appendix_h: bit(raw, 1),
            },
        };
    }
    MediaInfo::Optical {
        wavelength_nm: reader.read_u16_be(layout::MEDIA_RANGE).unwrap_or(0),
    }
}
