// crates/malpack-cli/src/main.rs
// ============================================================================
// Module: Malpack CLI Entry Point
// Description: Command dispatcher for manifest synchronization and generation.
// Purpose: Provide the operator surface over the manifest engine.
// Dependencies: clap, malpack-core, malpack-store-dynamodb, thiserror, time
// ============================================================================

//! ## Overview
//! The Malpack CLI synchronizes dataset manifests against the advisory and
//! triage stores and regenerates manifests from archived sample trees. The
//! manifest artifact is written to a file or standard output; diagnostics go
//! to standard error through the log layer so piped output stays clean.
//! Exit code `0` means success; any error exits `1`.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod generate;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use malpack_core::Ecosystem;
use malpack_core::Manifest;
use malpack_core::Synchronizer;
use malpack_store_dynamodb::DynamoStoreClient;
use malpack_store_dynamodb::DynamoStoreConfig;
use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

use crate::generate::generate_manifest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment fallback for the advisory table name.
const ADVISORY_TABLE_ENV: &str = "MALPACK_ADVISORY_TABLE";
/// Environment fallback for the triage table name.
const TRIAGE_TABLE_ENV: &str = "MALPACK_TRIAGE_TABLE";
/// Accepted `--since` timestamp format (UTC).
const SINCE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Log filter applied when `--log-level` is not a valid directive.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "malpack", version, about = "Malicious package dataset manifest tooling")]
struct Cli {
    /// Log filter directive (for example `warn` or `malpack_core=debug`).
    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_FILTER, global = true)]
    log_level: String,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Synchronize a manifest against the advisory and triage stores.
    Sync(SyncCommand),
    /// Generate a manifest from an on-disk sample tree.
    Generate(GenerateCommand),
}

/// Arguments for the `sync` subcommand.
#[derive(Args, Debug)]
struct SyncCommand {
    /// Package ecosystem to synchronize against (npm or pypi).
    #[arg(long)]
    ecosystem: Ecosystem,
    /// Lookback cutoff for advisory changes, UTC `YYYY-MM-DD HH:MM:SS`.
    #[arg(long, value_name = "TIME")]
    since: String,
    /// Input manifest file used as the synchronization starting point.
    #[arg(long, value_name = "PATH")]
    input_file: Option<PathBuf>,
    /// Output file for the synchronized manifest (stdout when omitted).
    #[arg(long, value_name = "PATH")]
    output_file: Option<PathBuf>,
    /// Advisory table name (falls back to `MALPACK_ADVISORY_TABLE`).
    #[arg(long, value_name = "NAME")]
    advisory_table: Option<String>,
    /// Triage table name (falls back to `MALPACK_TRIAGE_TABLE`).
    #[arg(long, value_name = "NAME")]
    triage_table: Option<String>,
    /// AWS region override.
    #[arg(long, value_name = "REGION")]
    region: Option<String>,
    /// Custom endpoint URL (for DynamoDB-compatible stores).
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Top-level directory containing the archived samples.
    #[arg(value_name = "PATH")]
    directory: PathBuf,
    /// Output file for the generated manifest (stdout when omitted).
    #[arg(long, value_name = "PATH")]
    output_file: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for operator-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the log layer, writing diagnostics to standard error.
fn init_logging(log_level: &str) {
    let filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Sync(command) => command_sync(&command),
        Commands::Generate(command) => command_generate(&command),
    }
}

// ============================================================================
// SECTION: Sync Command
// ============================================================================

/// Runs a manifest synchronization against the backing stores.
fn command_sync(command: &SyncCommand) -> CliResult<ExitCode> {
    let since = parse_since(&command.since)?;
    let input = load_manifest(command.input_file.as_deref())?;

    let mut config = DynamoStoreConfig::new(
        resolve_table(command.advisory_table.clone(), ADVISORY_TABLE_ENV, "--advisory-table")?,
        resolve_table(command.triage_table.clone(), TRIAGE_TABLE_ENV, "--triage-table")?,
    );
    config.region = command.region.clone();
    config.endpoint = command.endpoint.clone();

    let client =
        DynamoStoreClient::new(config).map_err(|err| CliError::new(err.to_string()))?;
    let synchronizer = Synchronizer::new(&client, &client);
    let output = synchronizer
        .sync(&input, command.ecosystem, since)
        .map_err(|err| CliError::new(err.to_string()))?;

    write_manifest(&output, command.output_file.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

/// Parses the `--since` cutoff into epoch seconds, assuming UTC.
fn parse_since(value: &str) -> CliResult<i64> {
    let datetime = PrimitiveDateTime::parse(value, SINCE_FORMAT)
        .map_err(|err| CliError::new(format!("invalid --since value '{value}': {err}")))?;
    Ok(datetime.assume_utc().unix_timestamp())
}

/// Resolves a table name from its flag with environment fallback.
fn resolve_table(flag: Option<String>, env_var: &str, flag_name: &str) -> CliResult<String> {
    if let Some(table) = flag {
        return Ok(table);
    }
    std::env::var(env_var)
        .map_err(|_| CliError::new(format!("{flag_name} not provided and {env_var} is not set")))
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Generates a manifest from an archived sample tree.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    let manifest =
        generate_manifest(&command.directory).map_err(|err| CliError::new(err.to_string()))?;
    write_manifest(&manifest, command.output_file.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Manifest I/O
// ============================================================================

/// Loads the input manifest; an absent path or file yields an empty one.
fn load_manifest(path: Option<&Path>) -> CliResult<Manifest> {
    let Some(path) = path else {
        return Ok(Manifest::new());
    };
    if !path.is_file() {
        return Ok(Manifest::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    Manifest::from_json_str(&raw)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

/// Writes the manifest to a file, or to stdout when no path is given.
fn write_manifest(manifest: &Manifest, path: Option<&Path>) -> CliResult<()> {
    let rendered = manifest.to_json_pretty().map_err(|err| CliError::new(err.to_string()))?;
    match path {
        Some(path) => fs::write(path, rendered)
            .map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display()))),
        None => write_stdout_line(&rendered)
            .map_err(|err| CliError::new(format!("failed to write stdout: {err}"))),
    }
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}
