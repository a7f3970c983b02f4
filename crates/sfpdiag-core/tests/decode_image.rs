use sfpdiag_core::eeprom::common::{LengthField, LengthUnit, checksum::compute};
use sfpdiag_core::eeprom::diagnostics::PageSelect;
use sfpdiag_core::eeprom::identity::{
    CalibrationKind, Connector, Encoding, Identifier, MediaInfo, SignalingRate,
};
use sfpdiag_core::{ImageFileSource, Severity, decode, inspect, make_report};

struct ImageBuilder {
    a0: Vec<u8>,
    a2: Vec<u8>,
}

impl ImageBuilder {
    fn optical_sr() -> Self {
        let mut a0 = vec![0u8; 256];
        a0[0] = 0x03;
        a0[1] = 0x04;
        a0[2] = 0x07;
        a0[3] = 0x10;
        a0[11] = 0x06;
        a0[12] = 0x67;
        a0[16] = 8;
        a0[17] = 3;
        a0[18] = 0xFF;
        a0[19] = 30;
        a0[20..36].copy_from_slice(b"ACME-OPTICS     ");
        a0[37..40].copy_from_slice(&[0x00, 0x90, 0x65]);
        a0[40..56].copy_from_slice(b"SFP-10G-SR      ");
        a0[56..60].copy_from_slice(b"A1  ");
        a0[60..62].copy_from_slice(&850u16.to_be_bytes());
        a0[65] = 0x1A;
        a0[68..84].copy_from_slice(b"AC1234567890    ");
        a0[84..92].copy_from_slice(b"24031501");
        a0[92] = 0x68;
        a0[93] = 0xF0;
        a0[94] = 0x08;

        let mut a2 = vec![0u8; 256];
        let put = |page: &mut Vec<u8>, offset: usize, raw: u16| {
            page[offset..offset + 2].copy_from_slice(&raw.to_be_bytes());
        };
        put(&mut a2, 0, 75 * 256);
        put(&mut a2, 4, 70 * 256);
        put(&mut a2, 96, 0x1900);
        put(&mut a2, 98, 33000);
        put(&mut a2, 100, 3000);
        put(&mut a2, 102, 5000);
        put(&mut a2, 104, 1000);
        Self { a0, a2 }
    }

    fn passive_dac() -> Self {
        let mut image = Self::optical_sr();
        image.a0[3] = 0x00;
        image.a0[8] = 0x04;
        image.a0[12] = 0xFF;
        image.a0[14] = 0x05;
        image.a0[18] = 3;
        image.a0[60] = 0x01;
        image.a0[61] = 0x00;
        image.a0[66] = 41;
        image.a0[92] = 0x00;
        image
    }

    fn seal(mut self) -> Self {
        self.a0[63] = compute(&self.a0, 0, 62).unwrap();
        self.a0[95] = compute(&self.a0, 64, 94).unwrap();
        self.a2[95] = compute(&self.a2, 0, 94).unwrap();
        self
    }

    fn image(&self) -> Vec<u8> {
        let mut bytes = self.a0.clone();
        bytes.extend_from_slice(&self.a2);
        bytes
    }
}

#[test]
fn optical_module_decodes_end_to_end() {
    let image = ImageBuilder::optical_sr().seal();
    let mut source = ImageFileSource::from_bytes(&image.image()).unwrap();
    let module = inspect(&mut source).unwrap();

    let base = &module.base;
    assert_eq!(base.identifier, Identifier::Sfp);
    assert_eq!(base.connector, Connector::Lc);
    assert_eq!(base.encoding, Encoding::SixtyFourB66B);
    assert_eq!(base.nominal_rate, SignalingRate::Valid { mbd: 10_300 });
    assert!(base.compliance.ethernet_infiniband.eth_10g_base_sr);
    assert_eq!(base.vendor.name.as_str(), "ACME-OPTICS");
    assert_eq!(base.vendor.oui_label(), "00:90:65");
    assert_eq!(base.media, MediaInfo::Optical { wavelength_nm: 850 });
    assert_eq!(
        base.lengths.om2,
        LengthField::Valid {
            value: 80.0,
            unit: LengthUnit::Meters
        }
    );
    assert_eq!(
        base.lengths.om4_or_copper,
        LengthField::Extended {
            lower_bound: 2540.0,
            unit: LengthUnit::Meters
        }
    );
    assert!(base.checksum.valid);

    let extended = &module.extended;
    assert!(extended.checksum.valid);
    assert_eq!(extended.serial_number.as_str(), "AC1234567890");
    let date = extended.date_code.date.as_ref().expect("date");
    assert_eq!((date.year, date.month, date.day), (2024, 3, 15));
    assert_eq!(date.lot.as_deref(), Some("01"));
    assert_eq!(extended.monitoring.calibration, CalibrationKind::Internal);
    assert!(extended.options.tx_disable_implemented);

    let diagnostics = module.diagnostics.as_ref().expect("diagnostics");
    assert!(diagnostics.checksum.valid);
    assert!(diagnostics.data_ready());
    assert_eq!(diagnostics.realtime.temperature_c, Some(25.0));
    assert!((diagnostics.realtime.rx_power_dbm - -10.0).abs() < 1e-9);
    assert_eq!(diagnostics.thresholds.temperature_c.high_alarm, Some(75.0));
    assert_eq!(diagnostics.page_select, PageSelect::UserEeprom(0));

    let report = make_report("module.bin", 512, module);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn passive_cable_switches_length_units() {
    let image = ImageBuilder::passive_dac().seal();
    let module = decode(&image.a0, Some(&image.a2));
    let base = &module.base;

    assert!(base.is_copper());
    assert!(matches!(
        base.media,
        MediaInfo::PassiveCable { compliance } if compliance.sff_8431_appendix_e
    ));
    assert_eq!(
        base.lengths.om4_or_copper,
        LengthField::Valid {
            value: 3.0,
            unit: LengthUnit::Meters
        }
    );
    assert_eq!(
        base.lengths.smf_km,
        LengthField::Valid {
            value: 2.5,
            unit: LengthUnit::Decibels
        }
    );
    assert_eq!(base.nominal_rate, SignalingRate::Extended { mbd: 25_400 });
    assert_eq!(module.signaling_rate_mbd, Some(10_250));
    assert!(module.diagnostics.is_none());
}

#[test]
fn checksum_damage_is_reported_but_decoding_continues() {
    let mut image = ImageBuilder::optical_sr().seal();
    image.a0[33] = b'X';
    image.a2[110] = 0x01;
    let module = decode(&image.a0, Some(&image.a2));
    assert!(!module.base.checksum.valid);
    assert_eq!(module.base.identifier, Identifier::Sfp);

    let report = make_report("module.bin", 512, module);
    let ids: Vec<_> = report.findings.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["SFP-A0-CC-BASE", "SFP-A0-VENDOR-NAME", "SFP-A2-DATA-NOT-READY"]);
    assert_eq!(report.findings[0].severity, Severity::Error);
}

#[test]
fn decoders_survive_every_prefix_length() {
    let image = ImageBuilder::optical_sr().seal();
    for len in 0..=image.a0.len() {
        let module = decode(&image.a0[..len], Some(&image.a2[..len]));
        if len < 64 {
            assert!(!module.base.checksum.valid);
        }
    }
}
