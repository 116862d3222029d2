#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;
use realmscribe::{ArmoryError, Cli, Config, app};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn log_level(cli: &Cli, config: &Config) -> Level {
    if cli.verbose {
        return Level::DEBUG;
    }
    Level::from_str(config.log_level.trim()).unwrap_or(Level::INFO)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&cli, &config))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install log subscriber: {e}");
    }

    // Overrides may have introduced invalid values.
    config.validate()?;

    if let Err(err) = app::dispatch(cli, config).await {
        match err.downcast_ref::<ArmoryError>() {
            Some(armory) => eprintln!("Error: {}", armory.user_message()),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
    Ok(())
}
