//! A0h identity page decoding.
//!
//! The base identity (bytes 0..=63) carries the module type, compliance
//! codes, link lengths and vendor strings; the extended identity (bytes
//! 64..=95) carries optional signals, serial number, date code and the
//! diagnostic monitoring type that gates any access to A2h.
//!
//! Byte 8 decides whether the module is a copper cable. That flag changes
//! the unit of every length byte and selects which member of the bytes
//! 60..=61 union (wavelength or cable compliance) gets decoded.
//!
//! Checksum mismatches are reported on the record and never stop decoding.

pub mod codes;
pub mod compliance;
pub mod error;
pub mod extended;
pub mod layout;
pub mod parser;
pub mod reader;

pub use codes::{
    ComplianceRevision, Connector, Encoding, ExtendedCompliance, Identifier, RateIdentifier,
};
pub use compliance::{ComplianceFlags, decode_compliance, fc_speed_2};
pub use error::IdentityError;
pub use extended::{
    CalibrationKind, DateCode, DiagnosticMonitoring, EnhancedOptions, ExtendedIdentity,
    ManufactureDate, OptionSignals, decode_extended, diagnostics_available,
    resolve_signaling_rate, try_decode_extended,
};
pub use parser::{
    ActiveCableCompliance, BaseIdentity, LinkLengths, MediaInfo, PassiveCableCompliance,
    SignalingRate, VendorInfo, decode_base, try_decode_base,
};
