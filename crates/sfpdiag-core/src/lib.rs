//! sfpdiag core library: SFF-8472 transceiver EEPROM decoding.
//!
//! The crate turns the raw identity page (A0h) and diagnostic page (A2h) of
//! an SFP module into typed records. Byte sources feed `inspect`, which
//! drives the page decoders (layout/reader/parser) and wraps the result in
//! a serializable report. Decoding is byte-oriented and side-effect free;
//! all I/O stays behind the [`TwoWireBus`] trait in `source`.
//!
//! Invariants:
//! - Total decoders never fail and never panic; short buffers decode to
//!   default records.
//! - Every code byte maps to a variant, reserved values included.
//! - Checksum mismatches are reported, never fatal.
//! - A2h is only read when A0h advertises digital diagnostics.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use sfpdiag_core::inspect_image_file;
//!
//! let report = inspect_image_file(Path::new("module.bin"))?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

pub mod eeprom;
mod inspect;
mod poll;
mod source;

pub use inspect::{
    InspectError, ModuleSnapshot, collect_findings, decode, inspect, inspect_identity,
    inspect_image_file,
};
pub use poll::{PollContext, ViewState};
pub use source::{
    A0_DEVICE, A2_DEVICE, ImageFileSource, MemoryBus, SourceError, TwoWireBus, read_block,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoded module report.
///
/// # Examples
/// ```
/// use sfpdiag_core::{ModuleSnapshot, make_report};
///
/// let report = make_report("module.bin", 512, ModuleSnapshot::default());
/// assert_eq!(report.report_version, sfpdiag_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of report generation.
    pub generated_at: String,

    /// Input image metadata.
    pub input: InputInfo,

    /// Decoded pages.
    pub module: ModuleSnapshot,
    /// Findings sorted by severity and ID.
    pub findings: Vec<Finding>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "sfpdiag").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input image metadata embedded in reports.
///
/// # Examples
/// ```
/// use sfpdiag_core::InputInfo;
///
/// let input = InputInfo {
///     path: "module.bin".to_string(),
///     bytes: 512,
/// };
/// assert_eq!(input.bytes, 512);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Finding severity; orders from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Single finding about a decoded module.
///
/// # Examples
/// ```
/// use sfpdiag_core::{Finding, Severity};
///
/// let finding = Finding::new("SFP-A0-CC-BASE", Severity::Error, "checksum mismatch");
/// assert_eq!(finding.severity.label(), "error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Stable finding identifier (e.g., `SFP-A2-ALARM`).
    pub id: String,
    pub severity: Severity,
    /// Human-readable message explaining the finding.
    pub message: String,
}

impl Finding {
    pub fn new(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
        }
    }
}

/// Builds a report for `module`, deriving its findings.
pub fn make_report(input_path: &str, input_bytes: u64, module: ModuleSnapshot) -> Report {
    let findings = collect_findings(&module);
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "sfpdiag".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        module,
        findings,
    }
}
