use std::env;
use std::process::Command;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for var in ["GITHUB_SHA", "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let revision = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .unwrap_or_else(|| "HEAD".to_string());
    let commit_full = git(&["rev-parse", &revision])
        .or_else(|| (revision != "HEAD").then(|| revision.clone()))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let commit = git(&["rev-parse", "--short=7", &revision])
        .or_else(|| (commit_full != UNKNOWN).then(|| commit_full.chars().take(7).collect()))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let date = git(&["log", "-1", "--format=%cI"])
        .or_else(source_date_epoch)
        .unwrap_or_else(|| UNKNOWN.to_string());

    for (key, value) in [
        ("SFPDIAG_BUILD_COMMIT", commit),
        ("SFPDIAG_BUILD_COMMIT_FULL", commit_full),
        ("SFPDIAG_BUILD_DATE", date),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }
}

/// Trimmed stdout of a successful git command.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim();
    (output.status.success() && !value.is_empty()).then(|| value.to_string())
}

// Reproducible builds outside a git checkout.
fn source_date_epoch() -> Option<String> {
    let epoch = env::var("SOURCE_DATE_EPOCH").ok()?.parse::<i64>().ok()?;
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()?
        .format(&Rfc3339)
        .ok()
}
