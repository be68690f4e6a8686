//! apply-export - Export stored applications as CSV
//!
//! Writes `applications.csv` into the configured export directory, or to
//! stdout with `--stdout`. An empty store produces no file.

use anyhow::{Context, Result};
use clap::Parser;
use libapplyform::config::Config;
use libapplyform::form::ConsoleNotifier;
use libapplyform::service::export::{DirectorySink, DownloadSink, ExportOutcome, WriterSink};
use libapplyform::service::ApplyformService;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "apply-export")]
#[command(version)]
#[command(about = "Export stored job applications to applications.csv", long_about = None)]
struct Cli {
    /// Directory to write applications.csv into (default: from config)
    #[arg(short, long, conflicts_with = "stdout")]
    output_dir: Option<String>,

    /// Write the CSV to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libapplyform::logging::init_default(cli.verbose);

    match run(cli).await {
        Ok(ExportOutcome::Exported { location, rows }) => {
            info!("Export completed successfully");
            eprintln!("Exported {} applications to {}", rows, location);
        }
        Ok(ExportOutcome::NoData) => {}
        Err(e) => {
            error!("Export failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<ExportOutcome> {
    let config = Config::load().context("Failed to load configuration")?;

    let service = ApplyformService::from_config(&config)
        .await
        .context("Failed to open application storage")?;

    let mut sink: Box<dyn DownloadSink> = if cli.stdout {
        Box::new(WriterSink::new(std::io::stdout()))
    } else {
        let directory = cli
            .output_dir
            .unwrap_or_else(|| config.export.directory.clone());
        Box::new(DirectorySink::new(directory))
    };

    let outcome = service
        .export()
        .export(sink.as_mut(), &mut ConsoleNotifier::default())
        .await
        .context("Failed to export applications")?;

    Ok(outcome)
}
