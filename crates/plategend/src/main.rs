//! Plategend - plate certificate generation service
//!
//! ## Commands
//!
//! - `process`: generate and store certificates for a queue batch
//! - `payload`: print the document payload for a single vehicle record

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};

use plategen_core::{init_tracing, BatchProcessor, LogFormat, PlateGenConfig, QueueEvent};
use plategen_domain::{PayloadBuilder, VehicleRecord};
use plategen_io::{HttpDocumentInvoker, HttpObjectStore};

#[derive(Parser)]
#[command(name = "plategend")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vehicle plate certificate generation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Deployment branch (`prod` removes the watermark)
    #[arg(long, global = true, env = "BRANCH")]
    branch: Option<String>,

    /// Certificate bucket suffix
    #[arg(long, global = true, env = "BUCKET")]
    bucket: Option<String>,

    /// Document service function name
    #[arg(long, global = true, env = "PLATE_GEN_FUNCTION")]
    function: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and store certificates for a queue batch
    Process {
        /// Batch event file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },

    /// Print the document payload for one vehicle record
    Payload {
        /// Vehicle record file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        record: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> PlateGenConfig {
        let mut config = PlateGenConfig::from_env();
        if let Some(branch) = &self.branch {
            config = config.with_branch(branch);
        }
        if let Some(bucket) = &self.bucket {
            config = config.with_bucket_suffix(bucket);
        }
        if let Some(function) = &self.function {
            config = config.with_function_name(function);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::from_env()
    };
    init_tracing(format, level);

    let config = cli.config();
    match cli.command {
        Commands::Process { event } => cmd_process(&config, &event).await,
        Commands::Payload { record } => cmd_payload(&config, &record),
    }
}

async fn cmd_process(config: &PlateGenConfig, event_path: &Path) -> Result<()> {
    if config.is_offline() {
        debug!(
            "Running offline against {} and {}",
            config.invoke.endpoint, config.store.endpoint
        );
    }

    let invoker = HttpDocumentInvoker::new(config.invoke.clone())
        .context("Failed to set up document service client")?;
    let store =
        HttpObjectStore::new(config.store.clone()).context("Failed to set up object store")?;
    let processor = BatchProcessor::from_config(config, Arc::new(invoker), Arc::new(store));

    let input = read_input(event_path)?;
    let output = run_batch(&processor, &input).await?;
    println!("{}", output);
    Ok(())
}

fn cmd_payload(config: &PlateGenConfig, record_path: &Path) -> Result<()> {
    let input = read_input(record_path)?;
    println!("{}", render_payload(config, &input)?);
    Ok(())
}

/// Process a batch event given as JSON text; returns the receipts as JSON.
async fn run_batch(processor: &BatchProcessor, input: &str) -> Result<String> {
    let event = QueueEvent::from_json(input).context("Event is not valid JSON")?;
    let receipts = processor.process(&event).await?;
    info!("Stored {} certificate(s)", receipts.len());
    Ok(serde_json::to_string_pretty(&receipts)?)
}

fn render_payload(config: &PlateGenConfig, input: &str) -> Result<String> {
    let vehicle: VehicleRecord =
        serde_json::from_str(input).context("Input is not a vehicle record")?;
    let payload = PayloadBuilder::new(config.deployment()).build(&vehicle)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
