//! A2h diagnostic page decoding.
//!
//! Thresholds and realtime values are 16-bit big-endian words. Each
//! quantity has its own scale; see [`crate::eeprom::common::units`]. The
//! status byte at 110 gates the realtime block: values read while bit 0 is
//! set are stale.
//!
//! The calibration kind from A0h byte 92 must be passed in by the caller,
//! it decides how bytes 56..=91 are labelled.

pub mod error;
pub mod flags;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::DiagnosticError;
pub use flags::{StatusControlFlags, ThresholdFlags};
pub use parser::{
    CalibrationArea, ControlBytes, Diagnostics, PageSelect, PagedBlock, RealtimeMeasurements,
    ThresholdLevel, ThresholdSet, Thresholds, decode_diagnostics, try_decode_diagnostics,
};
