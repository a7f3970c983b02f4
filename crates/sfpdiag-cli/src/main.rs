use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use sfpdiag_core::eeprom::diagnostics::RealtimeMeasurements;
use sfpdiag_core::{
    ImageFileSource, InspectError, PollContext, Severity, ViewState, inspect_identity,
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

mod render;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SFPDIAG_BUILD_COMMIT"),
    " ",
    env!("SFPDIAG_BUILD_DATE"),
    ")"
);

const IMAGE_EXTENSIONS: [&str; 3] = ["bin", "eeprom", "raw"];
const IMAGE_HINT: &str = "use a 256 or 512 byte .bin, .eeprom or .raw EEPROM dump";

#[derive(Parser, Debug)]
#[command(name = "sfpdiag")]
#[command(version = VERSION)]
#[command(
    about = "Decoder for SFF-8472 SFP transceiver EEPROM dumps (A0h identity / A2h diagnostics).",
    long_about = None,
    after_help = "Examples:\n  sfpdiag image decode module.bin -o report.json\n  sfpdiag image show module.bin\n  sfpdiag image watch module.bin --interval-ms 500 --count 10"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw EEPROM image files.
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// Decode an image and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  sfpdiag image decode module.bin -o report.json\n  sfpdiag image decode 'dumps/*.bin' --stdout --pretty"
    )]
    Decode {
        /// Path to a .bin, .eeprom or .raw image (glob patterns allowed)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if error or warning findings are present
        #[arg(long)]
        strict: bool,

        /// List findings after decoding
        #[arg(long)]
        list_findings: bool,
    },
    /// Print a human-readable view of an image.
    Show {
        /// Path to a .bin, .eeprom or .raw image (glob patterns allowed)
        input: PathBuf,
    },
    /// Re-read an image periodically and print realtime diagnostics.
    Watch {
        /// Path to a .bin, .eeprom or .raw image (glob patterns allowed)
        input: PathBuf,

        /// Delay between polls in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many polls (runs until interrupted when absent)
        #[arg(long)]
        count: Option<u64>,

        /// Print one JSON object per poll instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Image { command } => match command {
            ImageCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_findings,
            } => cmd_image_decode(
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_findings,
            ),
            ImageCommands::Show { input } => cmd_image_show(input),
            ImageCommands::Watch {
                input,
                interval_ms,
                count,
                json,
            } => cmd_image_watch(input, interval_ms, count, json),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_image_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_findings: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        let report_abs = report_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
        if let Some(report_dir) = report_abs {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let rep = sfpdiag_core::inspect_image_file(&resolved_input)
        .context("EEPROM image decoding failed")
        .map_err(|err| CliError::new(format!("{err:#}"), Some(IMAGE_HINT.to_string())))?;
    let json = serialize_report(&rep, pretty, compact)?;

    let Some(report) = report else {
        print!("{}", json);
        if list_findings && !quiet {
            print_findings(&rep);
        }
        return check_strict(&rep, strict);
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if list_findings && !quiet {
        print_findings(&rep);
    }
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(&rep, strict)
}

fn cmd_image_show(input: PathBuf) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let rep = sfpdiag_core::inspect_image_file(&resolved_input)
        .context("EEPROM image decoding failed")
        .map_err(|err| CliError::new(format!("{err:#}"), Some(IMAGE_HINT.to_string())))?;

    print!("{}", render::render_text(&rep.module));
    if !rep.findings.is_empty() {
        println!("Findings");
        for finding in &rep.findings {
            println!(
                "  {:<7}  {}  {}",
                finding.severity.label(),
                finding.id,
                finding.message
            );
        }
    }
    Ok(())
}

fn cmd_image_watch(
    input: PathBuf,
    interval_ms: u64,
    count: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if count == Some(0) {
        return Err(CliError::new(
            "--count must be at least 1",
            Some("omit --count to poll until interrupted".to_string()),
        ));
    }

    let mut ctx = PollContext::new(ViewState::default());
    let mut attempts = 0u64;
    loop {
        attempts += 1;
        let polled_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| sfpdiag_core::DEFAULT_GENERATED_AT.to_string());
        let outcome = ImageFileSource::open(&resolved_input)
            .map_err(InspectError::from)
            .and_then(|mut source| {
                if source.has_diagnostics() {
                    ctx.poll(&mut source)
                } else {
                    ctx.poll_with(&mut source, inspect_identity)
                }
            });
        match outcome {
            Ok(snapshot) if json => {
                let sample = WatchSample {
                    poll: attempts,
                    polled_at: &polled_at,
                    realtime: snapshot.diagnostics.as_ref().map(|d| &d.realtime),
                };
                let line = serde_json::to_string(&sample).context("JSON serialization failed")?;
                println!("{line}");
            }
            Ok(_) => {
                if let Some(line) = ctx.render(|module, _| render::summary_line(module)) {
                    println!("{polled_at} [{attempts}] {line}");
                }
            }
            Err(err) => eprintln!("{polled_at} [{attempts}] poll failed: {err}"),
        }
        if count.is_some_and(|count| attempts >= count) {
            break;
        }
        thread::sleep(Duration::from_millis(interval_ms));
    }

    if ctx.snapshot().is_none() {
        return Err(CliError::new(
            format!("no successful poll of {}", resolved_input.display()),
            Some(IMAGE_HINT.to_string()),
        ));
    }
    log::info!(
        "watch finished: {} polls, {} failed",
        ctx.polls(),
        ctx.failures()
    );
    Ok(())
}

#[derive(Serialize)]
struct WatchSample<'a> {
    poll: u64,
    polled_at: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    realtime: Option<&'a RealtimeMeasurements>,
}

fn check_strict(rep: &sfpdiag_core::Report, strict: bool) -> Result<(), CliError> {
    if strict && has_findings(rep) {
        return Err(CliError::new(
            "findings detected",
            Some("use --list-findings to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &sfpdiag_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_findings(rep: &sfpdiag_core::Report) -> bool {
    rep.findings
        .iter()
        .any(|finding| finding.severity <= Severity::Warning)
}

fn print_findings(rep: &sfpdiag_core::Report) {
    eprintln!("Findings:");
    for finding in &rep.findings {
        eprintln!("  {} {} {}", finding.severity.label(), finding.id, finding.message);
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some(IMAGE_HINT.to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(IMAGE_HINT.to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .bin, .eeprom or .raw file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .bin, .eeprom or .raw".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single image file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
