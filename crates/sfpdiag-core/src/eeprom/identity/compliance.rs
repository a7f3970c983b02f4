//! Transceiver compliance codes (A0h bytes 3..=10).
//!
//! Each byte explodes into independent named flags, MSB first. Reserved bit
//! positions are not represented. `labels()` on every group returns the
//! asserted flags in bit order for display.

use serde::Serialize;

use crate::eeprom::common::bit;

/// Byte 3: 10G Ethernet and InfiniBand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EthernetInfiniband {
    pub eth_10g_base_er: bool,
    pub eth_10g_base_lrm: bool,
    pub eth_10g_base_lr: bool,
    pub eth_10g_base_sr: bool,
    pub infiniband_1x_sx: bool,
    pub infiniband_1x_lx: bool,
    pub infiniband_1x_copper_active: bool,
    pub infiniband_1x_copper_passive: bool,
}

impl EthernetInfiniband {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            eth_10g_base_er: bit(byte, 7),
            eth_10g_base_lrm: bit(byte, 6),
            eth_10g_base_lr: bit(byte, 5),
            eth_10g_base_sr: bit(byte, 4),
            infiniband_1x_sx: bit(byte, 3),
            infiniband_1x_lx: bit(byte, 2),
            infiniband_1x_copper_active: bit(byte, 1),
            infiniband_1x_copper_passive: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.eth_10g_base_er, "10GBASE-ER"),
            (self.eth_10g_base_lrm, "10GBASE-LRM"),
            (self.eth_10g_base_lr, "10GBASE-LR"),
            (self.eth_10g_base_sr, "10GBASE-SR"),
            (self.infiniband_1x_sx, "InfiniBand 1X SX"),
            (self.infiniband_1x_lx, "InfiniBand 1X LX"),
            (self.infiniband_1x_copper_active, "InfiniBand 1X Copper Active"),
            (self.infiniband_1x_copper_passive, "InfiniBand 1X Copper Passive"),
        ])
    }
}

/// Byte 4: ESCON and the upper SONET codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EsconSonet {
    pub escon_mmf: bool,
    pub escon_smf: bool,
    pub oc_192_sr: bool,
    pub sonet_rs_1: bool,
    pub sonet_rs_2: bool,
    pub oc_48_lr: bool,
    pub oc_48_ir: bool,
    pub oc_48_sr: bool,
}

impl EsconSonet {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            escon_mmf: bit(byte, 7),
            escon_smf: bit(byte, 6),
            oc_192_sr: bit(byte, 5),
            sonet_rs_1: bit(byte, 4),
            sonet_rs_2: bit(byte, 3),
            oc_48_lr: bit(byte, 2),
            oc_48_ir: bit(byte, 1),
            oc_48_sr: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.escon_mmf, "ESCON MMF"),
            (self.escon_smf, "ESCON SMF"),
            (self.oc_192_sr, "OC-192 SR"),
            (self.sonet_rs_1, "SONET RS-1"),
            (self.sonet_rs_2, "SONET RS-2"),
            (self.oc_48_lr, "OC-48 LR"),
            (self.oc_48_ir, "OC-48 IR"),
            (self.oc_48_sr, "OC-48 SR"),
        ])
    }
}

/// Byte 5: OC-12 and OC-3 (bits 7 and 3 reserved).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sonet {
    pub oc_12_sm_lr: bool,
    pub oc_12_sm_ir: bool,
    pub oc_12_sr: bool,
    pub oc_3_sm_lr: bool,
    pub oc_3_sm_ir: bool,
    pub oc_3_sr: bool,
}

impl Sonet {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            oc_12_sm_lr: bit(byte, 6),
            oc_12_sm_ir: bit(byte, 5),
            oc_12_sr: bit(byte, 4),
            oc_3_sm_lr: bit(byte, 2),
            oc_3_sm_ir: bit(byte, 1),
            oc_3_sr: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.oc_12_sm_lr, "OC-12 SM LR"),
            (self.oc_12_sm_ir, "OC-12 SM IR"),
            (self.oc_12_sr, "OC-12 SR"),
            (self.oc_3_sm_lr, "OC-3 SM LR"),
            (self.oc_3_sm_ir, "OC-3 SM IR"),
            (self.oc_3_sr, "OC-3 SR"),
        ])
    }
}

/// Byte 6: 100M/1G Ethernet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ethernet {
    pub base_px: bool,
    pub base_bx_10: bool,
    pub eth_100_base_fx: bool,
    pub eth_100_base_lx: bool,
    pub eth_1000_base_t: bool,
    pub eth_1000_base_cx: bool,
    pub eth_1000_base_lx: bool,
    pub eth_1000_base_sx: bool,
}

impl Ethernet {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            base_px: bit(byte, 7),
            base_bx_10: bit(byte, 6),
            eth_100_base_fx: bit(byte, 5),
            eth_100_base_lx: bit(byte, 4),
            eth_1000_base_t: bit(byte, 3),
            eth_1000_base_cx: bit(byte, 2),
            eth_1000_base_lx: bit(byte, 1),
            eth_1000_base_sx: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.base_px, "BASE-PX"),
            (self.base_bx_10, "BASE-BX10"),
            (self.eth_100_base_fx, "100BASE-FX"),
            (self.eth_100_base_lx, "100BASE-LX/LX10"),
            (self.eth_1000_base_t, "1000BASE-T"),
            (self.eth_1000_base_cx, "1000BASE-CX"),
            (self.eth_1000_base_lx, "1000BASE-LX"),
            (self.eth_1000_base_sx, "1000BASE-SX"),
        ])
    }
}

/// Byte 7: Fibre Channel link length and the first transmitter codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FibreChannelLength {
    pub very_long_distance: bool,
    pub short_distance: bool,
    pub intermediate_distance: bool,
    pub long_distance: bool,
    pub medium_distance: bool,
    pub shortwave_laser_sa: bool,
    pub longwave_laser_lc: bool,
    pub electrical_inter_enclosure: bool,
}

impl FibreChannelLength {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            very_long_distance: bit(byte, 7),
            short_distance: bit(byte, 6),
            intermediate_distance: bit(byte, 5),
            long_distance: bit(byte, 4),
            medium_distance: bit(byte, 3),
            shortwave_laser_sa: bit(byte, 2),
            longwave_laser_lc: bit(byte, 1),
            electrical_inter_enclosure: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.very_long_distance, "Very long distance (V)"),
            (self.short_distance, "Short distance (S)"),
            (self.intermediate_distance, "Intermediate distance (I)"),
            (self.long_distance, "Long distance (L)"),
            (self.medium_distance, "Medium distance (M)"),
            (self.shortwave_laser_sa, "Shortwave laser, linear Rx (SA)"),
            (self.longwave_laser_lc, "Longwave laser (LC)"),
            (self.electrical_inter_enclosure, "Electrical inter-enclosure (EL)"),
        ])
    }
}

/// Byte 8: Fibre Channel transmitter technology and SFP+ cable type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FibreChannelTechnology {
    pub electrical_intra_enclosure: bool,
    pub shortwave_laser_sn: bool,
    pub shortwave_laser_sl: bool,
    pub longwave_laser_ll: bool,
    pub active_cable: bool,
    pub passive_cable: bool,
}

impl FibreChannelTechnology {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            electrical_intra_enclosure: bit(byte, 7),
            shortwave_laser_sn: bit(byte, 6),
            shortwave_laser_sl: bit(byte, 5),
            longwave_laser_ll: bit(byte, 4),
            active_cable: bit(byte, 3),
            passive_cable: bit(byte, 2),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.electrical_intra_enclosure, "Electrical intra-enclosure (EL)"),
            (self.shortwave_laser_sn, "Shortwave laser w/o OFC (SN)"),
            (self.shortwave_laser_sl, "Shortwave laser with OFC (SL)"),
            (self.longwave_laser_ll, "Longwave laser (LL)"),
            (self.active_cable, "Active SFP+ cable"),
            (self.passive_cable, "Passive SFP+ cable"),
        ])
    }
}

/// Byte 9: Fibre Channel transmission media (bit 1 reserved).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FibreChannelMedia {
    pub twin_axial_pair: bool,
    pub twisted_pair: bool,
    pub miniature_coax: bool,
    pub video_coax: bool,
    pub multimode_62_5um: bool,
    pub multimode_50um: bool,
    pub single_mode: bool,
}

impl FibreChannelMedia {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            twin_axial_pair: bit(byte, 7),
            twisted_pair: bit(byte, 6),
            miniature_coax: bit(byte, 5),
            video_coax: bit(byte, 4),
            multimode_62_5um: bit(byte, 3),
            multimode_50um: bit(byte, 2),
            single_mode: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.twin_axial_pair, "Twin axial pair (TW)"),
            (self.twisted_pair, "Twisted pair (TP)"),
            (self.miniature_coax, "Miniature coax (MI)"),
            (self.video_coax, "Video coax (TV)"),
            (self.multimode_62_5um, "Multimode 62.5 µm (M6)"),
            (self.multimode_50um, "Multimode 50 µm (M5, M5E)"),
            (self.single_mode, "Single mode (SM)"),
        ])
    }
}

/// Byte 10: Fibre Channel speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FibreChannelSpeed {
    pub mbps_1200: bool,
    pub mbps_800: bool,
    pub mbps_1600: bool,
    pub mbps_400: bool,
    pub mbps_3200: bool,
    pub mbps_200: bool,
    /// Byte 62 carries further speed codes.
    pub see_byte_62: bool,
    pub mbps_100: bool,
}

impl FibreChannelSpeed {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            mbps_1200: bit(byte, 7),
            mbps_800: bit(byte, 6),
            mbps_1600: bit(byte, 5),
            mbps_400: bit(byte, 4),
            mbps_3200: bit(byte, 3),
            mbps_200: bit(byte, 2),
            see_byte_62: bit(byte, 1),
            mbps_100: bit(byte, 0),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        asserted(&[
            (self.mbps_1200, "1200 MBytes/sec"),
            (self.mbps_800, "800 MBytes/sec"),
            (self.mbps_1600, "1600 MBytes/sec"),
            (self.mbps_400, "400 MBytes/sec"),
            (self.mbps_3200, "3200 MBytes/sec"),
            (self.mbps_200, "200 MBytes/sec"),
            (self.see_byte_62, "See byte 62"),
            (self.mbps_100, "100 MBytes/sec"),
        ])
    }
}

/// All eight compliance bytes, decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceFlags {
    pub raw: [u8; 8],
    pub ethernet_infiniband: EthernetInfiniband,
    pub escon_sonet: EsconSonet,
    pub sonet: Sonet,
    pub ethernet: Ethernet,
    pub fc_length: FibreChannelLength,
    pub fc_technology: FibreChannelTechnology,
    pub fc_media: FibreChannelMedia,
    pub fc_speed: FibreChannelSpeed,
}

impl ComplianceFlags {
    /// Group title and asserted labels, in byte order.
    pub fn groups(&self) -> [(&'static str, Vec<&'static str>); 8] {
        [
            ("10G Ethernet / InfiniBand", self.ethernet_infiniband.labels()),
            ("ESCON / SONET", self.escon_sonet.labels()),
            ("SONET", self.sonet.labels()),
            ("Ethernet", self.ethernet.labels()),
            ("Fibre Channel link length", self.fc_length.labels()),
            ("Fibre Channel technology", self.fc_technology.labels()),
            ("Fibre Channel media", self.fc_media.labels()),
            ("Fibre Channel speed", self.fc_speed.labels()),
        ]
    }
}

/// Decodes bytes 3..=10 in order.
pub fn decode_compliance(raw: [u8; 8]) -> ComplianceFlags {
    ComplianceFlags {
        raw,
        ethernet_infiniband: EthernetInfiniband::from_byte(raw[0]),
        escon_sonet: EsconSonet::from_byte(raw[1]),
        sonet: Sonet::from_byte(raw[2]),
        ethernet: Ethernet::from_byte(raw[3]),
        fc_length: FibreChannelLength::from_byte(raw[4]),
        fc_technology: FibreChannelTechnology::from_byte(raw[5]),
        fc_media: FibreChannelMedia::from_byte(raw[6]),
        fc_speed: FibreChannelSpeed::from_byte(raw[7]),
    }
}

/// 64GFC support from byte 62, only meaningful when byte 10 points at it.
///
/// # Examples
/// ```
/// use sfpdiag_core::eeprom::identity::compliance::{FibreChannelSpeed, fc_speed_2};
///
/// assert_eq!(fc_speed_2(0x01, &FibreChannelSpeed::from_byte(0x00)), None);
/// assert_eq!(fc_speed_2(0x01, &FibreChannelSpeed::from_byte(0x02)), Some(true));
/// ```
pub fn fc_speed_2(raw: u8, speed: &FibreChannelSpeed) -> Option<bool> {
    if speed.see_byte_62 {
        Some(bit(raw, 0))
    } else {
        None
    }
}

fn asserted(flags: &[(bool, &'static str)]) -> Vec<&'static str> {
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| *label)
        .collect()
}
