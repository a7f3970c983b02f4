use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::eeprom::diagnostics::{
    DiagnosticError, Diagnostics, decode_diagnostics, layout as a2, try_decode_diagnostics,
};
use crate::eeprom::identity::{
    BaseIdentity, ExtendedIdentity, IdentityError, decode_base, decode_extended,
    diagnostics_available, layout as a0, resolve_signaling_rate, try_decode_base,
    try_decode_extended,
};
use crate::source::{A0_DEVICE, A2_DEVICE, ImageFileSource, SourceError, TwoWireBus, read_block};
use crate::{DEFAULT_GENERATED_AT, Report, make_report};

mod findings;

pub use findings::collect_findings;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Identity decode error: {0}")]
    Identity(#[from] IdentityError),
    #[error("Diagnostic decode error: {0}")]
    Diagnostic(#[from] DiagnosticError),
}

/// Everything decoded from one poll of a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleSnapshot {
    pub base: BaseIdentity,
    pub extended: ExtendedIdentity,
    /// Nominal rate after applying the byte 66 override, in MBd.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signaling_rate_mbd: Option<u32>,
    /// `None` when the module has no DMI or the page was not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl ModuleSnapshot {
    pub fn diagnostics_available(&self) -> bool {
        diagnostics_available(&self.extended)
    }
}

/// Decodes already fetched pages. `a2` is ignored unless the identity page
/// advertises DMI.
pub fn decode(a0_page: &[u8], a2_page: Option<&[u8]>) -> ModuleSnapshot {
    let base = decode_base(a0_page);
    let extended = decode_extended(a0_page);
    let diagnostics = if diagnostics_available(&extended) {
        a2_page.map(|page| decode_diagnostics(page, extended.monitoring.calibration))
    } else {
        None
    };
    snapshot(base, extended, diagnostics)
}

/// Fetches and decodes a module: A0h first, then A2h only when DMI is
/// implemented.
pub fn inspect<B: TwoWireBus + ?Sized>(bus: &mut B) -> Result<ModuleSnapshot, InspectError> {
    let (base, extended) = read_identity(bus)?;
    if !diagnostics_available(&extended) {
        log::debug!("diagnostic page skipped: DMI not implemented");
        return Ok(snapshot(base, extended, None));
    }
    if extended.monitoring.address_change_required {
        log::warn!("module requires an address change before A2h access");
    }
    let page = read_block(bus, A2_DEVICE, 0, a2::PAGE_LEN)?;
    let diagnostics = try_decode_diagnostics(&page, extended.monitoring.calibration)?;
    Ok(snapshot(base, extended, Some(diagnostics)))
}

/// Fetches and decodes the identity page only.
pub fn inspect_identity<B: TwoWireBus + ?Sized>(
    bus: &mut B,
) -> Result<ModuleSnapshot, InspectError> {
    let (base, extended) = read_identity(bus)?;
    Ok(snapshot(base, extended, None))
}

/// Loads an image file and builds the full report for it.
pub fn inspect_image_file(path: &Path) -> Result<Report, InspectError> {
    let mut source = ImageFileSource::open(path)?;
    let module = if source.has_diagnostics() {
        inspect(&mut source)?
    } else {
        inspect_identity(&mut source)?
    };
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string());
    let mut report = make_report(&path.display().to_string(), source.len() as u64, module);
    report.generated_at = generated_at;
    Ok(report)
}

fn read_identity<B: TwoWireBus + ?Sized>(
    bus: &mut B,
) -> Result<(BaseIdentity, ExtendedIdentity), InspectError> {
    let page = read_block(bus, A0_DEVICE, 0, a0::PAGE_READ_LEN)?;
    Ok((try_decode_base(&page)?, try_decode_extended(&page)?))
}

fn snapshot(
    base: BaseIdentity,
    extended: ExtendedIdentity,
    diagnostics: Option<Diagnostics>,
) -> ModuleSnapshot {
    ModuleSnapshot {
        signaling_rate_mbd: resolve_signaling_rate(base.nominal_rate, &extended),
        base,
        extended,
        diagnostics,
    }
}
