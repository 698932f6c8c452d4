use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mission_control::data::export::export_to_file;
use mission_control::events::spawn_listeners;
use mission_control::{Aggregator, App, FrameBuilder, Settings, TerminalRenderer, Theme};

/// How long shutdown waits for probe work still running on blocking threads.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(name = "mission-control")]
#[command(about = "Live terminal status board for a home-lab node and its cloud instance")]
struct Args {
    /// Collect one snapshot, write it as JSON to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let settings = Settings::load().context("invalid MISSION_CONTROL_* settings")?;
    let rt = tokio::runtime::Runtime::new()?;

    let result = match args.export {
        Some(ref path) => rt.block_on(export_snapshot(&settings, path)),
        None => rt.block_on(run_board(&settings)),
    };

    rt.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

/// The board owns stdout, so logs only go to a file when one is given.
///
/// Fails if the log file cannot be created or a subscriber is already set.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("cannot install logger: {}", e))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init()
                .map_err(|e| anyhow!("cannot install logger: {}", e))?;
        }
    }
    Ok(())
}

/// Take one snapshot without touching the terminal.
async fn export_snapshot(settings: &Settings, path: &Path) -> Result<()> {
    let snapshot = Aggregator::system(settings).collect().await;
    export_to_file(&snapshot, path)?;
    info!(path = %path.display(), "snapshot exported");
    println!("Exported snapshot to: {}", path.display());
    Ok(())
}

async fn run_board(settings: &Settings) -> Result<()> {
    let theme = Theme::auto_detect();
    let controls = spawn_listeners();
    let renderer = TerminalRenderer::enter(theme)?;

    let mut app = App::new(
        Aggregator::system(settings),
        FrameBuilder::new(settings),
        renderer,
        controls,
    );
    let result = app.run().await;

    app.into_renderer().restore()?;
    result
}
