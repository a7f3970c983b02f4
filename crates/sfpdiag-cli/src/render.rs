use std::fmt::Write as _;

use sfpdiag_core::ModuleSnapshot;
use sfpdiag_core::eeprom::common::LengthField;
use sfpdiag_core::eeprom::diagnostics::{Diagnostics, ThresholdSet};
use sfpdiag_core::eeprom::identity::{CalibrationKind, MediaInfo};

pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, key: impl Into<String>, value: impl ToString) {
        self.rows.push((key.into(), value.to_string()));
    }
}

pub fn sections(module: &ModuleSnapshot) -> Vec<Section> {
    let mut out = vec![identity(module), lengths(module), compliance(module)];
    if let Some(diagnostics) = &module.diagnostics {
        out.push(realtime(diagnostics));
        out.push(thresholds(diagnostics));
    }
    out
}

pub fn render_text(module: &ModuleSnapshot) -> String {
    let mut text = String::new();
    for section in sections(module) {
        let _ = writeln!(text, "{}", section.title);
        let width = section.rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in &section.rows {
            let _ = writeln!(text, "  {key:<width$}  {value}");
        }
        text.push('\n');
    }
    text
}

/// One-line realtime summary used by `watch`.
pub fn summary_line(module: &ModuleSnapshot) -> String {
    let Some(diagnostics) = &module.diagnostics else {
        return format!(
            "{} {} (no diagnostics)",
            module.base.vendor.name.as_str(),
            module.base.vendor.part_number.as_str()
        );
    };
    let realtime = &diagnostics.realtime;
    let mut line = format!(
        "temp {} | vcc {} | bias {} | tx {:.2} dBm | rx {:.2} dBm",
        quantity(realtime.temperature_c, "C", 2),
        quantity(realtime.vcc_v, "V", 3),
        quantity(realtime.bias_ua, "uA", 1),
        realtime.tx_power_dbm,
        realtime.rx_power_dbm,
    );
    if !realtime.data_ready {
        line.push_str(" | stale");
    }
    line
}

fn identity(module: &ModuleSnapshot) -> Section {
    let base = &module.base;
    let extended = &module.extended;
    let mut section = Section::new("Identity");
    section.row("Identifier", base.identifier);
    section.row("Connector", base.connector);
    section.row("Encoding", base.encoding);
    section.row(
        "Signaling rate",
        module
            .signaling_rate_mbd
            .map(|mbd| format!("{mbd} MBd"))
            .unwrap_or_else(|| base.nominal_rate.to_string()),
    );
    section.row("Rate identifier", base.rate_identifier);
    section.row("Vendor", base.vendor.name.as_str());
    section.row("Vendor OUI", base.vendor.oui_label());
    section.row("Part number", base.vendor.part_number.as_str());
    section.row("Revision", base.vendor.revision.as_str());
    section.row("Serial number", extended.serial_number.as_str());
    section.row(
        "Date code",
        match &extended.date_code.date {
            Some(date) => format!("{:04}-{:02}-{:02}", date.year, date.month, date.day),
            None => extended.date_code.text.clone(),
        },
    );
    section.row(
        "Media",
        match base.media {
            MediaInfo::Optical { wavelength_nm } => format!("optical, {wavelength_nm} nm"),
            MediaInfo::PassiveCable { .. } => "passive copper cable".to_string(),
            MediaInfo::ActiveCable { .. } => "active copper cable".to_string(),
        },
    );
    section.row(
        "Diagnostics",
        match (
            extended.monitoring.dmi_implemented,
            extended.monitoring.calibration,
        ) {
            (false, _) => "not implemented",
            (true, CalibrationKind::External) => "implemented, externally calibrated",
            (true, _) => "implemented, internally calibrated",
        },
    );
    section.row("SFF-8472 revision", extended.compliance_revision);
    section.row("Checksums", checksum_status(module));
    section
}

fn checksum_status(module: &ModuleSnapshot) -> String {
    let status = |valid: bool| if valid { "ok" } else { "MISMATCH" };
    let mut text = format!(
        "base {}, extended {}",
        status(module.base.checksum.valid),
        status(module.extended.checksum.valid)
    );
    if let Some(diagnostics) = &module.diagnostics {
        let _ = write!(text, ", diagnostics {}", status(diagnostics.checksum.valid));
    }
    text
}

fn lengths(module: &ModuleSnapshot) -> Section {
    let lengths = &module.base.lengths;
    let copper = module.base.is_copper();
    let mut section = Section::new("Link lengths");
    let rows: [(&str, &str, &LengthField); 6] = [
        ("SMF (km)", "Attenuation @ 12.9 GHz", &lengths.smf_km),
        ("SMF (100 m)", "Attenuation @ 25.78 GHz", &lengths.smf_100m),
        ("OM2", "OM2", &lengths.om2),
        ("OM1", "OM1", &lengths.om1),
        ("OM4", "Copper", &lengths.om4_or_copper),
        ("OM3", "Cable", &lengths.om3_or_cable),
    ];
    for (optical, cable, field) in rows {
        if field.is_supported() {
            section.row(if copper { cable } else { optical }, field);
        }
    }
    section
}

fn compliance(module: &ModuleSnapshot) -> Section {
    let mut section = Section::new("Compliance");
    for (group, labels) in module.base.compliance.groups() {
        if !labels.is_empty() {
            section.row(group, labels.join(", "));
        }
    }
    section.row("Extended", module.base.extended_compliance);
    section
}

fn realtime(diagnostics: &Diagnostics) -> Section {
    let realtime = &diagnostics.realtime;
    let mut section = Section::new("Diagnostics");
    section.row("Temperature", quantity(realtime.temperature_c, "C", 2));
    section.row("Vcc", quantity(realtime.vcc_v, "V", 3));
    section.row("Tx bias", quantity(realtime.bias_ua, "uA", 1));
    section.row(
        "Tx power",
        format!(
            "{} ({:.2} dBm)",
            quantity(realtime.tx_power_uw, "uW", 1),
            realtime.tx_power_dbm
        ),
    );
    section.row(
        "Rx power",
        format!(
            "{} ({:.2} dBm)",
            quantity(realtime.rx_power_uw, "uW", 1),
            realtime.rx_power_dbm
        ),
    );
    section.row("Laser temperature", quantity(realtime.laser_temperature_c, "C", 2));
    section.row("TEC current", quantity(realtime.tec_current_ma, "mA", 1));
    section.row("Data ready", if realtime.data_ready { "yes" } else { "no" });
    let status = diagnostics.status.labels();
    if !status.is_empty() {
        section.row("Status", status.join(", "));
    }
    let alarms = diagnostics.alarms.asserted();
    if !alarms.is_empty() {
        section.row("Alarms", alarms.join(", "));
    }
    let warnings = diagnostics.warnings.asserted();
    if !warnings.is_empty() {
        section.row("Warnings", warnings.join(", "));
    }
    section
}

fn thresholds(diagnostics: &Diagnostics) -> Section {
    let thresholds = &diagnostics.thresholds;
    let mut section = Section::new("Thresholds (low alarm / low warn / high warn / high alarm)");
    let rows: [(&str, &ThresholdSet, &str, usize); 7] = [
        ("Temperature", &thresholds.temperature_c, "C", 2),
        ("Vcc", &thresholds.vcc_v, "V", 3),
        ("Tx bias", &thresholds.bias_ua, "uA", 1),
        ("Tx power", &thresholds.tx_power_uw, "uW", 1),
        ("Rx power", &thresholds.rx_power_uw, "uW", 1),
        ("Laser temperature", &thresholds.laser_temperature_c, "C", 2),
        ("TEC current", &thresholds.tec_current_ma, "mA", 1),
    ];
    for (name, set, unit, precision) in rows {
        section.row(
            name,
            format!(
                "{} / {} / {} / {}",
                quantity(set.low_alarm, unit, precision),
                quantity(set.low_warning, unit, precision),
                quantity(set.high_warning, unit, precision),
                quantity(set.high_alarm, unit, precision),
            ),
        );
    }
    section
}

fn quantity(value: Option<f64>, unit: &str, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$} {unit}"),
        None => "n/a".to_string(),
    }
}
