//! Kagami - Motion-capture retargeting service
//!
//! Main entry point: binds the solve-result receiver and runs a tracking
//! session against a full humanoid rig until interrupted.

use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kagami::{
    avatar::Avatar, config::Config, rig::HumanoidSkeleton, session::Session,
    tracking::SolveReceiver,
};

/// Kagami - drives a humanoid avatar rig from live solve results
#[derive(Parser, Debug)]
#[command(name = "kagami", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// UDP port to receive solve results on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", kagami::NAME, kagami::VERSION);

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(port) = args.port {
        config.receiver.port = port;
    }
    config.validate()?;

    let mut receiver = SolveReceiver::new(&config.receiver);
    receiver.start()?;

    let avatar = Avatar::new(HumanoidSkeleton::full(), config.tuning.clone());
    let session = Session::new(avatar);

    let (frame_tx, frame_rx) = mpsc::channel(64);
    let receiver_task = tokio::spawn(receiver.run(frame_tx, session.subscribe_shutdown()));
    let session_task = session.clone().run(frame_rx);

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    // Frame delivery stops before the retargeting loop is torn down
    session.shutdown();
    receiver_task.await?;
    session_task.await?;

    Ok(())
}
