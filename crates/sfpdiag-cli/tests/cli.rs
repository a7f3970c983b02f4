use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use sfpdiag_core::eeprom::common::checksum::compute;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sfpdiag"))
}

/// 512-byte image of a 10GBASE-SR optic with internally calibrated DMI.
fn clean_image() -> Vec<u8> {
    let mut a0 = vec![0u8; 256];
    a0[0] = 0x03;
    a0[1] = 0x04;
    a0[2] = 0x07;
    a0[3] = 0x10;
    a0[11] = 0x06;
    a0[12] = 0x67;
    a0[16] = 8;
    a0[20..36].copy_from_slice(b"ACME-OPTICS     ");
    a0[40..56].copy_from_slice(b"SFP-10G-SR      ");
    a0[56..60].copy_from_slice(b"A1  ");
    a0[60..62].copy_from_slice(&850u16.to_be_bytes());
    a0[68..84].copy_from_slice(b"AC1234567890    ");
    a0[84..92].copy_from_slice(b"240315  ");
    a0[92] = 0x68;
    a0[63] = compute(&a0, 0, 62).unwrap();
    a0[95] = compute(&a0, 64, 94).unwrap();

    let mut a2 = vec![0u8; 256];
    a2[96..98].copy_from_slice(&0x1900u16.to_be_bytes());
    a2[98..100].copy_from_slice(&33000u16.to_be_bytes());
    a2[104..106].copy_from_slice(&1000u16.to_be_bytes());
    a2[95] = compute(&a2, 0, 94).unwrap();

    a0.extend(a2);
    a0
}

/// Same module with a corrupted base checksum and an asserted alarm.
fn damaged_image() -> Vec<u8> {
    let mut image = clean_image();
    image[63] ^= 0xFF;
    image[256 + 112] = 0x80;
    image
}

fn write_image(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write image");
    path
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_image_commands() {
    for command in ["decode", "show", "watch"] {
        cmd().arg("image").arg(command).arg("--help").assert().success();
    }
}

#[test]
fn version_includes_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("sfpdiag").and(contains("(")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.txt", &clean_image());

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn truncated_image_fails_with_hint() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image()[..300]);

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("invalid EEPROM image").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());

    let assert = cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let report = stdout_json(&assert);
    assert_eq!(report["report_version"], 1);
    assert_eq!(report["tool"]["name"], "sfpdiag");
    assert_eq!(report["input"]["bytes"], 512);
    assert_eq!(report["module"]["base"]["identifier"], "sfp");
    assert_eq!(report["module"]["base"]["vendor"]["name"]["text"], "ACME-OPTICS");
    assert_eq!(report["module"]["signaling_rate_mbd"], 10300);
    assert_eq!(
        report["module"]["diagnostics"]["realtime"]["temperature_c"],
        25.0
    );
    assert_eq!(report["findings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn identity_only_image_omits_diagnostics() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.eeprom", &clean_image()[..256]);

    let assert = cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let report = stdout_json(&assert);
    assert!(report["module"].get("diagnostics").is_none());
    assert_eq!(report["findings"][0]["id"], "SFP-A2-MISSING");
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));
    let text = std::fs::read_to_string(&report).expect("report");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["report_version"], 1);
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());

    cmd()
        .arg("image")
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn list_findings_outputs_ids() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &damaged_image());

    cmd()
        .arg("image")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .arg("--list-findings")
        .assert()
        .success()
        .stderr(
            contains("Findings:")
                .and(contains("SFP-A0-CC-BASE"))
                .and(contains("SFP-A2-ALARM")),
        );
}

#[test]
fn strict_fails_only_when_findings_present() {
    let temp = TempDir::new().expect("tempdir");
    let clean = write_image(temp.path(), "clean.bin", &clean_image());
    let damaged = write_image(temp.path(), "damaged.bin", &damaged_image());

    cmd()
        .arg("image")
        .arg("decode")
        .arg(clean)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
    cmd()
        .arg("image")
        .arg("decode")
        .arg(damaged)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("findings detected"));
}

#[test]
fn glob_pattern_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    write_image(temp.path(), "module.bin", &clean_image());
    let pattern = temp.path().join("*.bin");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn glob_pattern_rejects_multiple_matches() {
    let temp = TempDir::new().expect("tempdir");
    write_image(temp.path(), "a.bin", &clean_image());
    write_image(temp.path(), "b.bin", &clean_image());
    let pattern = temp.path().join("*.bin");

    cmd()
        .arg("image")
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn show_renders_sections_and_findings() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &damaged_image());

    cmd()
        .arg("image")
        .arg("show")
        .arg(input)
        .assert()
        .success()
        .stdout(
            contains("Identity")
                .and(contains("ACME-OPTICS"))
                .and(contains("optical, 850 nm"))
                .and(contains("25.00 C"))
                .and(contains("temperature high"))
                .and(contains("SFP-A0-CC-BASE")),
        );
}

#[test]
fn watch_polls_requested_count() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());

    let assert = cmd()
        .arg("image")
        .arg("watch")
        .arg(input)
        .arg("--interval-ms")
        .arg("1")
        .arg("--count")
        .arg("2")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[1]") && lines[0].contains("temp 25.00 C"));
    assert!(lines[1].contains("[2]"));
}

#[test]
fn watch_json_emits_one_object_per_poll() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &clean_image());

    let assert = cmd()
        .arg("image")
        .arg("watch")
        .arg(input)
        .arg("--interval-ms")
        .arg("1")
        .arg("--count")
        .arg("3")
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let samples: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[2]["poll"], 3);
    assert_eq!(samples[0]["realtime"]["data_ready"], true);
}

#[test]
fn watch_polls_identity_only_dump_of_dmi_module() {
    let temp = TempDir::new().expect("tempdir");
    let mut image = clean_image();
    image.truncate(256);
    assert_eq!(image[92], 0x68);
    let input = write_image(temp.path(), "module.bin", &image);

    let assert = cmd()
        .arg("image")
        .arg("watch")
        .arg(&input)
        .arg("--interval-ms")
        .arg("1")
        .arg("--count")
        .arg("1")
        .assert()
        .success()
        .stderr(contains("poll failed").not());
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("[1]") && stdout.contains("no diagnostics"));

    let assert = cmd()
        .arg("image")
        .arg("watch")
        .arg(&input)
        .arg("--count")
        .arg("1")
        .arg("--json")
        .assert()
        .success();
    let sample = stdout_json(&assert);
    assert_eq!(sample["poll"], 1);
    assert!(sample.get("realtime").is_none());
}

#[test]
fn watch_fails_when_no_poll_succeeds() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_image(temp.path(), "module.bin", &[0u8; 10]);

    cmd()
        .arg("image")
        .arg("watch")
        .arg(input)
        .arg("--interval-ms")
        .arg("1")
        .arg("--count")
        .arg("1")
        .assert()
        .code(2)
        .stderr(contains("poll failed").and(contains("no successful poll")));
}
