//! Single-byte code tables of the A0h page (SFF-8024 / SFF-8472).
//!
//! Every table is total over `0..=255`: codes without a name resolve to an
//! explicit reserved, vendor-specific or unknown variant that keeps the raw
//! value.

use std::fmt;

use serde::Serialize;

/// Physical device type (byte 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    Gbic,
    Sfp,
    Qsfp,
    QsfpPlus,
    Qsfp28,
    Unknown(u8),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Unknown(0)
    }
}

impl Identifier {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x02 => Identifier::Gbic,
            0x03 => Identifier::Sfp,
            0x0C => Identifier::Qsfp,
            0x0D => Identifier::QsfpPlus,
            0x11 => Identifier::Qsfp28,
            other => Identifier::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Identifier::Gbic => "GBIC",
            Identifier::Sfp => "SFP/SFP+",
            Identifier::Qsfp => "QSFP",
            Identifier::QsfpPlus => "QSFP+",
            Identifier::Qsfp28 => "QSFP28",
            Identifier::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Connector type (byte 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    #[default]
    Unknown,
    Sc,
    FcStyle1,
    FcStyle2,
    BncTnc,
    FcCoax,
    FiberJack,
    Lc,
    MtRj,
    Mu,
    Sg,
    OpticalPigtail,
    Mpo1x12,
    Mpo2x16,
    HssdcII,
    CopperPigtail,
    Rj45,
    NoSeparableConnector,
    Mxc2x16,
    Cs,
    Sn,
    Mpo2x12,
    Mpo1x16,
    Reserved(u8),
    VendorSpecific(u8),
}

impl Connector {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Connector::Unknown,
            0x01 => Connector::Sc,
            0x02 => Connector::FcStyle1,
            0x03 => Connector::FcStyle2,
            0x04 => Connector::BncTnc,
            0x05 => Connector::FcCoax,
            0x06 => Connector::FiberJack,
            0x07 => Connector::Lc,
            0x08 => Connector::MtRj,
            0x09 => Connector::Mu,
            0x0A => Connector::Sg,
            0x0B => Connector::OpticalPigtail,
            0x0C => Connector::Mpo1x12,
            0x0D => Connector::Mpo2x16,
            0x20 => Connector::HssdcII,
            0x21 => Connector::CopperPigtail,
            0x22 => Connector::Rj45,
            0x23 => Connector::NoSeparableConnector,
            0x24 => Connector::Mxc2x16,
            0x25 => Connector::Cs,
            0x26 => Connector::Sn,
            0x27 => Connector::Mpo2x12,
            0x28 => Connector::Mpo1x16,
            0x80..=0xFF => Connector::VendorSpecific(code),
            other => Connector::Reserved(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Connector::Unknown => "Unknown",
            Connector::Sc => "SC",
            Connector::FcStyle1 => "Fibre Channel Style 1 copper",
            Connector::FcStyle2 => "Fibre Channel Style 2 copper",
            Connector::BncTnc => "BNC/TNC",
            Connector::FcCoax => "Fibre Channel coax headers",
            Connector::FiberJack => "Fiber Jack",
            Connector::Lc => "LC",
            Connector::MtRj => "MT-RJ",
            Connector::Mu => "MU",
            Connector::Sg => "SG",
            Connector::OpticalPigtail => "Optical pigtail",
            Connector::Mpo1x12 => "MPO 1x12",
            Connector::Mpo2x16 => "MPO 2x16",
            Connector::HssdcII => "HSSDC II",
            Connector::CopperPigtail => "Copper pigtail",
            Connector::Rj45 => "RJ45",
            Connector::NoSeparableConnector => "No separable connector",
            Connector::Mxc2x16 => "MXC 2x16",
            Connector::Cs => "CS optical connector",
            Connector::Sn => "SN optical connector",
            Connector::Mpo2x12 => "MPO 2x12",
            Connector::Mpo1x16 => "MPO 1x16",
            Connector::Reserved(_) => "Reserved",
            Connector::VendorSpecific(_) => "Vendor specific",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serial encoding (byte 11).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    Unspecified,
    #[serde(rename = "8b10b")]
    EightB10B,
    #[serde(rename = "4b5b")]
    FourB5B,
    Nrz,
    Manchester,
    SonetScrambled,
    #[serde(rename = "64b66b")]
    SixtyFourB66B,
    #[serde(rename = "256b257b")]
    TwoFiftySixB257B,
    Pam4,
    Reserved(u8),
}

impl Encoding {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Encoding::Unspecified,
            0x01 => Encoding::EightB10B,
            0x02 => Encoding::FourB5B,
            0x03 => Encoding::Nrz,
            0x04 => Encoding::Manchester,
            0x05 => Encoding::SonetScrambled,
            0x06 => Encoding::SixtyFourB66B,
            0x07 => Encoding::TwoFiftySixB257B,
            0x08 => Encoding::Pam4,
            other => Encoding::Reserved(other),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Encoding::Unspecified => "Unspecified",
            Encoding::EightB10B => "8B/10B",
            Encoding::FourB5B => "4B/5B",
            Encoding::Nrz => "NRZ",
            Encoding::Manchester => "Manchester",
            Encoding::SonetScrambled => "SONET Scrambled",
            Encoding::SixtyFourB66B => "64B/66B",
            Encoding::TwoFiftySixB257B => "256B/257B",
            Encoding::Pam4 => "PAM4",
            Encoding::Reserved(code) => return write!(f, "Reserved(0x{code:02X})"),
        };
        f.write_str(label)
    }
}

/// Rate select functionality (byte 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateIdentifier {
    /// 0x00 and the odd codes 0x03..=0x11.
    Unspecified(u8),
    Sff8079,
    Sff8431RxOnly,
    Sff8431TxOnly,
    Sff8431Independent,
    FcPi5RxOnly,
    FcPi5Independent,
    FcPi6Independent,
    TenEightGRxTx,
    FcPi7Independent,
    PmdBased,
    Reserved(u8),
}

impl Default for RateIdentifier {
    fn default() -> Self {
        RateIdentifier::Unspecified(0)
    }
}

impl RateIdentifier {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => RateIdentifier::Sff8079,
            0x02 => RateIdentifier::Sff8431RxOnly,
            0x04 => RateIdentifier::Sff8431TxOnly,
            0x06 => RateIdentifier::Sff8431Independent,
            0x08 => RateIdentifier::FcPi5RxOnly,
            0x0A => RateIdentifier::FcPi5Independent,
            0x0C => RateIdentifier::FcPi6Independent,
            0x0E => RateIdentifier::TenEightGRxTx,
            0x10 => RateIdentifier::FcPi7Independent,
            0x20 => RateIdentifier::PmdBased,
            0x00 | 0x03 | 0x05 | 0x07 | 0x09 | 0x0B | 0x0D | 0x0F | 0x11 => {
                RateIdentifier::Unspecified(code)
            }
            other => RateIdentifier::Reserved(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateIdentifier::Unspecified(_) => "Unspecified",
            RateIdentifier::Sff8079 => "SFF-8079 (4/2/1G rate select & AS0/AS1)",
            RateIdentifier::Sff8431RxOnly => "SFF-8431 (8/4/2G Rx rate select only)",
            RateIdentifier::Sff8431TxOnly => "SFF-8431 (8/4/2G Tx rate select only)",
            RateIdentifier::Sff8431Independent => "SFF-8431 (8/4/2G independent Rx & Tx)",
            RateIdentifier::FcPi5RxOnly => "FC-PI-5 (16/8/4G Rx rate select only)",
            RateIdentifier::FcPi5Independent => "FC-PI-5 (16/8/4G independent Rx & Tx)",
            RateIdentifier::FcPi6Independent => "FC-PI-6 (32/16/8G independent Rx & Tx)",
            RateIdentifier::TenEightGRxTx => "10/8G Rx and Tx rate select",
            RateIdentifier::FcPi7Independent => "FC-PI-7 (64/32/16G independent Rx & Tx)",
            RateIdentifier::PmdBased => "Rate select based on PMDs",
            RateIdentifier::Reserved(_) => "Reserved",
        }
    }
}

impl fmt::Display for RateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const EXTENDED_COMPLIANCE_NAMES: &[(u8, &str)] = &[
    (0x00, "Unspecified"),
    (0x01, "100G AOC or 25GAUI C2M AOC (BER 5e-5)"),
    (0x02, "100GBASE-SR4 or 25GBASE-SR"),
    (0x03, "100GBASE-LR4 or 25GBASE-LR"),
    (0x04, "100GBASE-ER4 or 25GBASE-ER"),
    (0x05, "100GBASE-SR10"),
    (0x06, "100G CWDM4"),
    (0x07, "100G PSM4 Parallel SMF"),
    (0x08, "100G ACC or 25GAUI C2M ACC (BER 5e-5)"),
    (0x09, "Obsolete (assigned before 100G CWDM4 MSA)"),
    (0x0B, "100GBASE-CR4, 25GBASE-CR CA-25G-L or 50GBASE-CR2 with RS-FEC"),
    (0x0C, "25GBASE-CR CA-25G-S or 50GBASE-CR2 with BASE-R FEC"),
    (0x0D, "25GBASE-CR CA-25G-N or 50GBASE-CR2 with no FEC"),
    (0x0E, "10 Mb/s Single Pair Ethernet"),
    (0x10, "40GBASE-ER4"),
    (0x11, "4 x 10GBASE-SR"),
    (0x12, "40G PSM4 Parallel SMF"),
    (0x13, "G.959.1 profile P1I1-2D1"),
    (0x14, "G.959.1 profile P1S1-2D2"),
    (0x15, "G.959.1 profile P1L1-2D2"),
    (0x16, "10GBASE-T with SFI electrical interface"),
    (0x17, "100G CLR4"),
    (0x18, "100G AOC or 25GAUI C2M AOC (BER 1e-12)"),
    (0x19, "100G ACC or 25GAUI C2M ACC (BER 1e-12)"),
    (0x1A, "100GE-DWDM2"),
    (0x1B, "100G 1550nm WDM (4 wavelengths)"),
    (0x1C, "10GBASE-T Short Reach"),
    (0x1D, "5GBASE-T"),
    (0x1E, "2.5GBASE-T"),
    (0x1F, "40G SWDM4"),
    (0x20, "100G SWDM4"),
    (0x21, "100G PAM4 BiDi"),
    (0x22, "4WDM-10 MSA"),
    (0x23, "4WDM-20 MSA"),
    (0x24, "4WDM-40 MSA"),
    (0x25, "100GBASE-DR (CAUI-4 without FEC)"),
    (0x26, "100G-FR or 100GBASE-FR1 (CAUI-4 without FEC)"),
    (0x27, "100G-LR or 100GBASE-LR1 (CAUI-4 without FEC)"),
    (0x28, "100GBASE-SR1 (CAUI-4 without FEC)"),
    (0x29, "100GBASE-SR1, 200GBASE-SR2 or 400GBASE-SR4"),
    (0x2A, "100GBASE-FR1 or 400GBASE-DR4-2"),
    (0x2B, "100GBASE-LR1"),
    (0x2C, "100G-LR1-20 MSA (CAUI-4 without FEC)"),
    (0x2D, "100G-ER1-30 MSA (CAUI-4 without FEC)"),
    (0x2E, "100G-ER1-40 MSA (CAUI-4 without FEC)"),
    (0x2F, "100G-LR1-20 MSA"),
    (0x30, "Active Copper Cable (50GAUI, 100GAUI-2, 200GAUI-4 C2M, BER 1e-6)"),
    (0x31, "Active Optical Cable (50GAUI, 100GAUI-2, 200GAUI-4 C2M, BER 1e-6)"),
    (0x32, "Active Copper Cable (50GAUI, 100GAUI-2, 200GAUI-4 C2M, BER 2.6e-4)"),
    (0x33, "Active Optical Cable (50GAUI, 100GAUI-2, 200GAUI-4 C2M, BER 2.6e-4)"),
    (0x34, "100G-ER1-30 MSA"),
    (0x35, "100G-ER1-40 MSA"),
    (0x36, "100GBASE-VR1 (CAUI-4 without FEC)"),
    (0x37, "10GBASE-BR"),
    (0x38, "25GBASE-BR"),
    (0x39, "50GBASE-BR"),
    (0x3A, "100GBASE-VR1"),
    (0x3F, "100GBASE-CR1, 200GBASE-CR2 or 400GBASE-CR4"),
    (0x40, "50GBASE-CR, 100GBASE-CR2 or 200GBASE-CR4"),
    (0x41, "50GBASE-SR, 100GBASE-SR2 or 200GBASE-SR4"),
    (0x42, "50GBASE-FR or 200GBASE-DR4"),
    (0x43, "200GBASE-FR4"),
    (0x44, "200G 1550nm PSM4"),
    (0x45, "50GBASE-LR"),
    (0x46, "200GBASE-LR4"),
    (0x47, "400GBASE-DR4 (400GAUI-4 C2M)"),
    (0x48, "400GBASE-FR4"),
    (0x49, "400GBASE-LR4-6"),
    (0x4B, "400G-LR4-10"),
    (0x4C, "Obsolete (400GBASE-ZR)"),
    (0x7F, "256GFC-SW4"),
    (0x80, "64GFC"),
    (0x81, "128GFC"),
];

/// Codes inside the named part of the table that SFF-8024 leaves unassigned.
const RESERVED_TABLE_CODES: &[u8] = &[0x0A, 0x0F, 0x3B, 0x3C, 0x3D, 0x3E, 0x4A];

/// Extended specification compliance (byte 36).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedCompliance {
    Named(u8),
    Reserved(u8),
    VendorSpecific,
    Unknown(u8),
}

impl Default for ExtendedCompliance {
    fn default() -> Self {
        ExtendedCompliance::Named(0x00)
    }
}

impl ExtendedCompliance {
    /// Resolves a code: named table entry, reserved slot or range, vendor
    /// specific (0xFF), and only then unknown.
    ///
    /// # Examples
    /// ```
    /// use sfpdiag_core::eeprom::identity::ExtendedCompliance;
    ///
    /// assert_eq!(ExtendedCompliance::from_code(0x80).label(), "64GFC");
    /// assert_eq!(ExtendedCompliance::from_code(0x4D), ExtendedCompliance::Reserved(0x4D));
    /// assert_eq!(ExtendedCompliance::from_code(0xFF), ExtendedCompliance::VendorSpecific);
    /// ```
    pub fn from_code(code: u8) -> Self {
        if lookup_name(code).is_some() {
            return ExtendedCompliance::Named(code);
        }
        if RESERVED_TABLE_CODES.contains(&code)
            || (0x4D..=0x7E).contains(&code)
            || (0x82..=0xFE).contains(&code)
        {
            return ExtendedCompliance::Reserved(code);
        }
        if code == 0xFF {
            return ExtendedCompliance::VendorSpecific;
        }
        ExtendedCompliance::Unknown(code)
    }

    pub fn code(&self) -> u8 {
        match self {
            ExtendedCompliance::Named(code)
            | ExtendedCompliance::Reserved(code)
            | ExtendedCompliance::Unknown(code) => *code,
            ExtendedCompliance::VendorSpecific => 0xFF,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtendedCompliance::Named(code) => lookup_name(*code).unwrap_or("Unknown"),
            ExtendedCompliance::Reserved(_) => "Reserved",
            ExtendedCompliance::VendorSpecific => "Vendor Specific",
            ExtendedCompliance::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for ExtendedCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn lookup_name(code: u8) -> Option<&'static str> {
    EXTENDED_COMPLIANCE_NAMES
        .iter()
        .find(|(entry, _)| *entry == code)
        .map(|(_, name)| *name)
}

/// SFF-8472 revision the module claims compliance with (byte 94).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceRevision {
    #[default]
    NotIncluded,
    Rev9_3,
    Rev9_5,
    Rev10_2,
    Rev10_4,
    Rev11_0,
    Rev11_3,
    Rev11_4,
    Rev12_3,
    Rev12_4,
    Unknown(u8),
}

impl ComplianceRevision {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => ComplianceRevision::NotIncluded,
            0x01 => ComplianceRevision::Rev9_3,
            0x02 => ComplianceRevision::Rev9_5,
            0x03 => ComplianceRevision::Rev10_2,
            0x04 => ComplianceRevision::Rev10_4,
            0x05 => ComplianceRevision::Rev11_0,
            0x06 => ComplianceRevision::Rev11_3,
            0x07 => ComplianceRevision::Rev11_4,
            0x08 => ComplianceRevision::Rev12_3,
            0x09 => ComplianceRevision::Rev12_4,
            other => ComplianceRevision::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplianceRevision::NotIncluded => "Not included",
            ComplianceRevision::Rev9_3 => "SFF-8472 Rev 9.3",
            ComplianceRevision::Rev9_5 => "SFF-8472 Rev 9.5",
            ComplianceRevision::Rev10_2 => "SFF-8472 Rev 10.2",
            ComplianceRevision::Rev10_4 => "SFF-8472 Rev 10.4",
            ComplianceRevision::Rev11_0 => "SFF-8472 Rev 11.0",
            ComplianceRevision::Rev11_3 => "SFF-8472 Rev 11.3",
            ComplianceRevision::Rev11_4 => "SFF-8472 Rev 11.4",
            ComplianceRevision::Rev12_3 => "SFF-8472 Rev 12.3",
            ComplianceRevision::Rev12_4 => "SFF-8472 Rev 12.4",
            ComplianceRevision::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for ComplianceRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
