use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use ember_server::{EmberServer, ServerConfig};

#[derive(Parser)]
#[command(name = "ember-server", about = "Ephemeral encrypted content drop")]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Data directory for sealed blobs (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seconds between retention sweeps (overrides config).
    #[arg(long)]
    sweep_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ember_server=info,ember_store=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(interval) = args.sweep_interval {
        config.sweep_interval_secs = interval;
    }

    tracing::info!("ember-server v{} starting", env!("CARGO_PKG_VERSION"));
    EmberServer::new(config).serve().await?;
    Ok(())
}
