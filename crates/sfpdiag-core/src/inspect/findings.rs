use crate::eeprom::common::{AsciiField, ChecksumField};
use crate::{Finding, Severity};

use super::ModuleSnapshot;

/// Collects findings for a decoded module, sorted by severity then id.
pub fn collect_findings(module: &ModuleSnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();
    let base = &module.base;
    let extended = &module.extended;

    check_checksum(&mut findings, "SFP-A0-CC-BASE", "A0h base", &base.checksum);
    check_checksum(&mut findings, "SFP-A0-CC-EXT", "A0h extended", &extended.checksum);

    check_ascii(&mut findings, "SFP-A0-VENDOR-NAME", "vendor name", &base.vendor.name);
    check_ascii(&mut findings, "SFP-A0-VENDOR-PN", "vendor part number", &base.vendor.part_number);
    check_ascii(&mut findings, "SFP-A0-VENDOR-REV", "vendor revision", &base.vendor.revision);
    check_ascii(&mut findings, "SFP-A0-SERIAL", "serial number", &extended.serial_number);

    if !base.extended_identifier_valid {
        findings.push(Finding::new(
            "SFP-A0-EXT-ID",
            Severity::Warning,
            format!(
                "extended identifier is 0x{:02X}, expected 0x04",
                base.extended_identifier
            ),
        ));
    }
    if extended.monitoring.address_change_required {
        findings.push(Finding::new(
            "SFP-A0-ADDR-CHANGE",
            Severity::Info,
            "module requires an address change before A2h access",
        ));
    }

    match &module.diagnostics {
        None if module.diagnostics_available() => findings.push(Finding::new(
            "SFP-A2-MISSING",
            Severity::Warning,
            "module implements DMI but no A2h page was read",
        )),
        None => {}
        Some(diagnostics) => {
            check_checksum(&mut findings, "SFP-A2-CC-DMI", "A2h", &diagnostics.checksum);
            if !diagnostics.data_ready() {
                findings.push(Finding::new(
                    "SFP-A2-DATA-NOT-READY",
                    Severity::Warning,
                    "realtime diagnostics not ready; values may be stale",
                ));
            }
            let alarms = diagnostics.alarms.asserted();
            if !alarms.is_empty() {
                findings.push(Finding::new(
                    "SFP-A2-ALARM",
                    Severity::Error,
                    format!("alarm flags asserted: {}", alarms.join(", ")),
                ));
            }
            let warnings = diagnostics.warnings.asserted();
            if !warnings.is_empty() {
                findings.push(Finding::new(
                    "SFP-A2-WARNING",
                    Severity::Warning,
                    format!("warning flags asserted: {}", warnings.join(", ")),
                ));
            }
        }
    }

    findings.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.id.cmp(&b.id)));
    findings
}

fn check_checksum(findings: &mut Vec<Finding>, id: &str, area: &str, checksum: &ChecksumField) {
    if checksum.valid {
        return;
    }
    findings.push(Finding::new(
        id,
        Severity::Error,
        format!(
            "{area} checksum mismatch over bytes {}..={}: stored 0x{:02X}, computed 0x{:02X}",
            checksum.start, checksum.end, checksum.stored, checksum.computed
        ),
    ));
}

fn check_ascii(findings: &mut Vec<Finding>, id: &str, field: &str, value: &AsciiField) {
    if value.valid {
        return;
    }
    findings.push(Finding::new(
        id,
        Severity::Warning,
        format!("{field} is not printable ASCII: \"{}\"", value.as_str()),
    ));
}
