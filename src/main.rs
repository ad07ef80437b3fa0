//! firegate - Firebase-authenticated document gateway
//!
//! Loads configuration, installs logging, and serves until shutdown.

use clap::Parser;
use firegate::config::Config;
use firegate::server;
use firegate::utils::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "firegate", version, about)]
struct Args {
    /// Configuration file; missing files fall back to defaults and environment
    #[arg(short, long, env = "FIREGATE_CONFIG", default_value = "config/firegate.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load(&args.config).await?;

    if let Some(host) = args.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }

    init_tracing(config.logging());
    config.validate()?;

    server::run_server(config).await?;
    Ok(())
}
