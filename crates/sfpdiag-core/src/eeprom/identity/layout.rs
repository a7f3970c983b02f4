use std::ops::Range;

/// Bytes read from A0h to cover base and extended identity (the vendor area
/// 96..=127 is read but not decoded).
pub const PAGE_READ_LEN: usize = 128;
pub const BASE_LEN: usize = 64;
pub const EXTENDED_LEN: usize = 96;

// Base identity (0..=63).
pub const IDENTIFIER_OFFSET: usize = 0;
pub const EXT_IDENTIFIER_OFFSET: usize = 1;
pub const CONNECTOR_OFFSET: usize = 2;
pub const COMPLIANCE_RANGE: Range<usize> = 3..11;
pub const ENCODING_OFFSET: usize = 11;
pub const NOMINAL_RATE_OFFSET: usize = 12;
pub const RATE_IDENTIFIER_OFFSET: usize = 13;
pub const LENGTH_SMF_KM_OFFSET: usize = 14;
pub const LENGTH_SMF_100M_OFFSET: usize = 15;
pub const LENGTH_OM2_OFFSET: usize = 16;
pub const LENGTH_OM1_OFFSET: usize = 17;
pub const LENGTH_OM4_OR_COPPER_OFFSET: usize = 18;
pub const LENGTH_OM3_OR_CABLE_OFFSET: usize = 19;
pub const VENDOR_NAME_RANGE: Range<usize> = 20..36;
pub const EXT_COMPLIANCE_OFFSET: usize = 36;
pub const VENDOR_OUI_RANGE: Range<usize> = 37..40;
pub const VENDOR_PN_RANGE: Range<usize> = 40..56;
pub const VENDOR_REV_RANGE: Range<usize> = 56..60;
pub const MEDIA_RANGE: Range<usize> = 60..62;
pub const FC_SPEED_2_OFFSET: usize = 62;
pub const BASE_CHECKSUM_END: usize = 62;
pub const CC_BASE_OFFSET: usize = 63;

// Extended identity (64..=95).
pub const EXTENDED_START: usize = 64;
pub const OPTIONS_RANGE: Range<usize> = 64..66;
pub const BR_MAX_OFFSET: usize = 66;
pub const BR_MIN_OFFSET: usize = 67;
pub const SERIAL_RANGE: Range<usize> = 68..84;
pub const DATE_CODE_RANGE: Range<usize> = 84..92;
pub const MONITORING_TYPE_OFFSET: usize = 92;
pub const ENHANCED_OPTIONS_OFFSET: usize = 93;
pub const COMPLIANCE_REVISION_OFFSET: usize = 94;
pub const EXTENDED_CHECKSUM_END: usize = 94;
pub const CC_EXT_OFFSET: usize = 95;

/// Byte 1 value for SFP/SFP+ modules with two-wire ID.
pub const SFP_EXT_IDENTIFIER: u8 = 0x04;

pub const NOMINAL_RATE_UNIT_MBD: u32 = 100;
pub const NOMINAL_RATE_EXTENDED_MBD: u32 = 25_400;
/// Unit of byte 66 when byte 12 reads 0xFF.
pub const EXTENDED_RATE_UNIT_MBD: u32 = 250;

// Byte 8 cable technology bits.
pub const ACTIVE_CABLE_BIT: u8 = 3;
pub const PASSIVE_CABLE_BIT: u8 = 2;
/// Index of byte 8 inside `COMPLIANCE_RANGE`.
pub const CABLE_TECHNOLOGY_INDEX: usize = 5;

// Byte 92 diagnostic monitoring type bits.
pub const DMI_IMPLEMENTED_BIT: u8 = 6;
pub const INTERNAL_CALIBRATION_BIT: u8 = 5;
pub const EXTERNAL_CALIBRATION_BIT: u8 = 4;
pub const RX_POWER_AVERAGE_BIT: u8 = 3;
pub const ADDRESS_CHANGE_BIT: u8 = 2;
