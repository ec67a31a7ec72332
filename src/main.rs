//! Virtual Mouse command-line entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tracing::{info, warn};
use virtual_mouse::capture::ReplayDetector;
use virtual_mouse::config::Config;
use virtual_mouse::control::{FrameLoop, LoggingDispatcher};

/// Virtual Mouse - pointer control from hand landmarks
#[derive(Parser, Debug)]
#[command(name = "virtual-mouse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (per-frame finger state)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a recorded landmark trace through the gesture engine
    Replay {
        /// Landmark trace file (JSON)
        #[arg(short, long)]
        trace: PathBuf,

        /// Mirror landmarks horizontally before classification
        #[arg(long)]
        mirror: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration to a file
    Init {
        #[arg(short, long, default_value = "virtual-mouse.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    virtual_mouse::init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Replay { trace, mirror } => run_replay(&trace, mirror, config).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => println!("{}", config.to_json()?),
            ConfigAction::Init { output } => {
                Config::default().save(&output)?;
                info!("Wrote default config to {}", output.display());
            }
        },
    }

    Ok(())
}

async fn run_replay(trace: &Path, mirror: bool, mut config: Config) -> anyhow::Result<()> {
    config.detector.mirror |= mirror;
    config.validate()?;

    let detector = ReplayDetector::from_file(trace, config.detector)
        .with_context(|| format!("failed to open trace {}", trace.display()))?;
    let dispatcher = LoggingDispatcher::new(config.scroll.amount);
    let mut frame_loop = FrameLoop::new(&config, Box::new(dispatcher));

    let stop = frame_loop.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current frame");
            stop.store(true, Ordering::SeqCst);
        }
    });

    info!(
        "Replaying {} on a {}x{} screen (smoothing={})",
        trace.display(),
        config.screen.width,
        config.screen.height,
        config.pointer.smoothing
    );

    let stats = frame_loop.run_queued(detector).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
