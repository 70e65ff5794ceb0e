//! `meshmap` binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mm_domain::config::Config;

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load(&cli.config)?;
    for issue in config.validate() {
        tracing::warn!(issue = %issue, "configuration issue");
    }

    match cli.command {
        Command::Discover { json } => cli::discover::run(&config, json).await,
        Command::Watch { interval } => cli::discover::watch(&config, interval).await,
        Command::Probe {
            address,
            max_retries,
            silent,
            json,
        } => cli::probe_cmd::run(&config, &address, max_retries, silent, json).await,
        Command::Unsupported(command) => cli::unsupported_cmd::run(&config, command),
        Command::Doctor { address } => {
            let passed = cli::doctor::run(&config, &address).await?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Version => {
            println!("meshmap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Human-readable tracing on stderr; `RUST_LOG` overrides the default.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mm_engine=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
