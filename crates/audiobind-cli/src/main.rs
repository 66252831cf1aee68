use std::process::ExitCode;

use audiobind_core::Config;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

use cli::{Cli, Notice};

fn load_config() -> anyhow::Result<Config> {
    let config = match std::env::var("AUDIOBIND_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading config file");
            Config::load(&path)?
        }
        Err(_) => Config::from_env(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(filebin_url = %config.filebin_url, "configuration loaded");

    match cli::run(args.command, &config).await {
        Ok(notices) => {
            for notice in notices {
                match notice {
                    Notice::Success(message) => println!("{message}"),
                    Notice::Failure(message) => eprintln!("{message}"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            tracing::debug!("command failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
