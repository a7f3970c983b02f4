use std::ops::Range;

/// Lower half of A2h; everything the decoder needs except the paged block.
pub const MIN_LEN: usize = 128;
pub const PAGE_LEN: usize = 256;

/// First offset of each threshold group (high alarm, low alarm, high
/// warning, low warning; two bytes each).
pub const TEMPERATURE_THRESHOLDS: usize = 0;
pub const VCC_THRESHOLDS: usize = 8;
pub const BIAS_THRESHOLDS: usize = 16;
pub const TX_POWER_THRESHOLDS: usize = 24;
pub const RX_POWER_THRESHOLDS: usize = 32;
pub const LASER_TEMPERATURE_THRESHOLDS: usize = 40;
pub const TEC_CURRENT_THRESHOLDS: usize = 48;
pub const THRESHOLD_GROUP_LEN: usize = 8;

pub const CALIBRATION_RANGE: Range<usize> = 56..92;
pub const DMI_CHECKSUM_END: usize = 94;
pub const CC_DMI_OFFSET: usize = 95;

pub const TEMPERATURE_RANGE: Range<usize> = 96..98;
pub const VCC_RANGE: Range<usize> = 98..100;
pub const BIAS_RANGE: Range<usize> = 100..102;
pub const TX_POWER_RANGE: Range<usize> = 102..104;
pub const RX_POWER_RANGE: Range<usize> = 104..106;
pub const LASER_TEMPERATURE_RANGE: Range<usize> = 106..108;
pub const TEC_CURRENT_RANGE: Range<usize> = 108..110;

pub const STATUS_CONTROL_OFFSET: usize = 110;
pub const ALARM_FLAGS_RANGE: Range<usize> = 112..114;
pub const TX_EQUALIZATION_OFFSET: usize = 114;
pub const RX_EMPHASIS_OFFSET: usize = 115;
pub const WARNING_FLAGS_RANGE: Range<usize> = 116..118;
pub const EXT_STATUS_CONTROL_RANGE: Range<usize> = 118..120;
pub const VENDOR_RANGE: Range<usize> = 120..127;
pub const PAGE_SELECT_OFFSET: usize = 127;
pub const PAGED_RANGE: Range<usize> = 128..256;

// Byte 110 status/control bits.
pub const TX_DISABLE_STATE_BIT: u8 = 7;
pub const SOFT_TX_DISABLE_BIT: u8 = 6;
pub const RS1_STATE_BIT: u8 = 5;
pub const RS0_STATE_BIT: u8 = 4;
pub const SOFT_RS0_SELECT_BIT: u8 = 3;
pub const TX_FAULT_STATE_BIT: u8 = 2;
pub const RX_LOS_STATE_BIT: u8 = 1;
pub const DATA_NOT_READY_BIT: u8 = 0;
