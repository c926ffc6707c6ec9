use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use phone_tester::{AppConfig, logging, server};
use tracing::error;

/// SMS relay test harness
#[derive(Parser, Debug)]
#[command(name = "phone-tester", version, about, long_about = None)]
struct Cli {
    /// Extra configuration file, layered over config/ and under SMS__* env vars
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Listen address (overrides configuration)
    #[arg(long)]
    address: Option<String>,

    /// Listen port (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(address) = cli.address {
        config.server.listen_address = address;
    }
    if let Some(port) = cli.port {
        config.server.listen_port = port;
    }

    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
