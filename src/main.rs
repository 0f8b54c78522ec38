/*============================================================
  Project: apkver
  Module: apkver::main
  ------------------------------------------------------------
  Purpose:
    Entry point for apkver. Resolves the latest published
    release of the tracked app and records its version label
    and build number as JSON for update-checking pipelines.

  Security / Safety Notes:
    Operates within user privileges. Performs two HTTPS GET
    requests and writes a single output file.

  Dependencies:
    clap for CLI parsing, tokio for the async runtime, chrono
    for session stamps.

  Operational Scope:
    Invoked by build pipelines or operators on demand; each run
    is independent and stateless.

  Revision History:
    2026-10-19  Authored apkver runtime.
============================================================*/

mod apkmirror;
mod config;
mod error;
mod logger;
mod markup;
mod output;
#[cfg(test)]
mod test_support;
mod version_info;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{ArgAction, Parser};

use apkmirror::{ReleaseClient, LISTING_URL};
use config::FetcherConfig;
use error::Result;
use logger::Logger;
use output::{write_version_file, DEFAULT_OUTPUT};
use version_info::VersionInfo;

/// Command-line arguments for apkver.
#[derive(Debug, Parser)]
#[command(
    name = "apkver",
    version,
    about = "Fetch latest app version and build number"
)]
struct Cli {
    /// Output JSON file path.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[apkver] {err}");
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = FetcherConfig::load_from_optional_path(cli.config.as_deref())?;

    let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let log_path = cli.log.clone().or_else(|| {
        config
            .log_dir()
            .map(|dir| dir.join(format!("apkver_{session_stamp}.log")))
    });
    let logger = Logger::new(log_path, cli.verbose)?;
    logger.info("INIT", format!("Fetching latest release from {LISTING_URL}"));

    let client = ReleaseClient::new(&config.http, LISTING_URL)?;
    let outcome = fetch_and_record(&client, &cli.output, &logger).await;
    if let Err(err) = &outcome {
        logger.error(err.log_code(), err.to_string());
    }
    logger.finalize()?;

    outcome.map(|_| ExitCode::SUCCESS)
}

/// Fetch the latest release and write it to `output`.
///
/// The file is only touched once both values have been extracted.
async fn fetch_and_record(
    client: &ReleaseClient,
    output: &Path,
    logger: &Logger,
) -> Result<VersionInfo> {
    let info = client.fetch_latest(logger).await?;
    println!("App Version: {}", info.version_name);
    println!("Build Number: {}", info.version_code);

    write_version_file(&info, output)?;
    println!("Version information saved to {}", output.display());
    logger.info("OUTPUT", format!("Wrote {}", output.display()));
    Ok(info)
}
