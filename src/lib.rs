pub mod log;

pub mod audio;
pub mod commands;
pub mod config;
pub mod output;

// Re-export core types for testing and external use
pub use audio::{
    AggregateDescription, AggregateDeviceManager, AggregateSpec, AudioDevicesError,
    AudioObjectId, DefaultDeviceSelector, Device, DeviceEnumerator, DeviceRole, Direction,
    PropertyAddress, PropertyStore, TransportType,
};

use anyhow::{Context, Result};
use clap::Parser;

use commands::Cli;
use config::ConfigManager;
use output::Format;

/// Parse arguments, load config, run the command against the system hardware.
///
/// Returns the process exit code; errors are printed to stderr.
pub fn run() -> i32 {
    let cli = Cli::parse();
    match run_cli(&cli) {
        Ok(Some(text)) => {
            println!("{}", text);
            0
        }
        Ok(None) => 0,
        Err(e) => {
            eprintln!("{:#}", e);
            1
        }
    }
}

fn run_cli(cli: &Cli) -> Result<Option<String>> {
    let config = ConfigManager::new(cli.config.as_deref())?.load()?;
    log::init(cli.verbose, config.logging.level.as_deref())?;

    let store = audio::system_store().context("Cannot access audio hardware")?;
    let defaults = Format {
        json: config.output.json,
        pretty: config.output.pretty,
    };
    commands::execute(&cli.command, store.as_ref(), defaults)
}
