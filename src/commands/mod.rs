// Command line surface
//
// Each verb group lives in its own module and returns the text to print (or
// nothing for pure mutations), so the whole surface runs against any
// `PropertyStore`.

pub mod aggregate;
pub mod defaults;
pub mod devices;
pub mod mute;
pub mod volume;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::audio::{AudioObjectId, DeviceRole, Direction, PropertyStore};
use crate::output::Format;

#[derive(Debug, Parser)]
#[command(name = "audio-devices", version)]
#[command(about = "List and control macOS audio devices", long_about = None)]
pub struct Cli {
    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available audio devices
    List {
        /// Only list input devices
        #[arg(short, long, conflicts_with = "output")]
        input: bool,

        /// Only list output devices
        #[arg(short, long)]
        output: bool,

        /// Print the result in json format
        #[arg(short, long)]
        json: bool,
    },

    /// Get a device by its id
    Get {
        device_id: AudioObjectId,

        /// Print the result in json format
        #[arg(short, long)]
        json: bool,
    },

    /// Get or set the default output device
    Output {
        #[command(subcommand)]
        action: RoleCommand,
    },

    /// Get or set the default input device
    Input {
        #[command(subcommand)]
        action: RoleCommand,
    },

    /// Get or set the default device for system sounds
    System {
        #[command(subcommand)]
        action: RoleCommand,
    },

    /// Get or set the volume of a device
    Volume {
        #[command(subcommand)]
        action: VolumeCommand,
    },

    /// Get, set or toggle the mute state of a device
    Mute {
        #[command(subcommand)]
        action: MuteCommand,
    },

    /// Create or destroy aggregate audio devices
    Aggregate {
        #[command(subcommand)]
        action: AggregateCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    Get {
        /// Print the result in json format
        #[arg(short, long)]
        json: bool,
    },
    Set {
        device_id: AudioObjectId,
    },
}

/// `--input` / `--output` selector for per-direction controls (output by default)
#[derive(Debug, Clone, Copy, Args)]
pub struct DirectionArgs {
    /// Use the input side of the device
    #[arg(short, long, conflicts_with = "output")]
    pub input: bool,

    /// Use the output side of the device (default)
    #[arg(short, long)]
    pub output: bool,
}

impl DirectionArgs {
    pub fn direction(&self) -> Direction {
        if self.input {
            Direction::Input
        } else {
            Direction::Output
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum VolumeCommand {
    Get {
        device_id: AudioObjectId,

        #[command(flatten)]
        direction: DirectionArgs,
    },
    Set {
        device_id: AudioObjectId,

        /// Volume between 0 and 1
        #[arg(allow_negative_numbers = true)]
        volume: f64,

        #[command(flatten)]
        direction: DirectionArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum MuteCommand {
    Get {
        device_id: AudioObjectId,

        #[command(flatten)]
        direction: DirectionArgs,
    },
    Set {
        device_id: AudioObjectId,

        /// true or false
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        muted: bool,

        #[command(flatten)]
        direction: DirectionArgs,
    },
    Toggle {
        device_id: AudioObjectId,

        #[command(flatten)]
        direction: DirectionArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AggregateCommand {
    /// Create an aggregate device using existing devices
    Create {
        /// Print the result in json format
        #[arg(short, long)]
        json: bool,

        /// Create the aggregate device as a Multi-Output Device
        #[arg(short, long)]
        multi_output: bool,

        /// Unique identifier for the new device (generated when omitted)
        #[arg(long)]
        uid: Option<String>,

        name: String,

        main_device_id: AudioObjectId,

        #[arg(required = true, num_args = 1..)]
        other_device_ids: Vec<AudioObjectId>,
    },

    /// Destroy a created aggregate device
    Destroy { device_id: AudioObjectId },
}

/// Run one parsed command. `defaults` carries config-level output settings;
/// a `--json` flag always turns JSON on.
pub fn execute(
    command: &Command,
    store: &dyn PropertyStore,
    defaults: Format,
) -> Result<Option<String>> {
    let format = |json: bool| Format {
        json: json || defaults.json,
        pretty: defaults.pretty,
    };

    match command {
        Command::List {
            input,
            output,
            json,
        } => {
            let filter = if *input {
                Some(Direction::Input)
            } else if *output {
                Some(Direction::Output)
            } else {
                None
            };
            devices::list(store, filter, format(*json)).map(Some)
        }
        Command::Get { device_id, json } => {
            devices::get(store, *device_id, format(*json)).map(Some)
        }
        Command::Output { action } => run_role(store, DeviceRole::Output, action, &format),
        Command::Input { action } => run_role(store, DeviceRole::Input, action, &format),
        Command::System { action } => run_role(store, DeviceRole::System, action, &format),
        Command::Volume { action } => match action {
            VolumeCommand::Get {
                device_id,
                direction,
            } => volume::get(store, *device_id, direction.direction()).map(Some),
            VolumeCommand::Set {
                device_id,
                volume,
                direction,
            } => volume::set(store, *device_id, direction.direction(), *volume).map(|_| None),
        },
        Command::Mute { action } => match action {
            MuteCommand::Get {
                device_id,
                direction,
            } => mute::get(store, *device_id, direction.direction()).map(Some),
            MuteCommand::Set {
                device_id,
                muted,
                direction,
            } => mute::set(store, *device_id, direction.direction(), *muted).map(|_| None),
            MuteCommand::Toggle {
                device_id,
                direction,
            } => mute::toggle(store, *device_id, direction.direction()).map(Some),
        },
        Command::Aggregate { action } => match action {
            AggregateCommand::Create {
                json,
                multi_output,
                uid,
                name,
                main_device_id,
                other_device_ids,
            } => aggregate::create(
                store,
                aggregate::CreateRequest {
                    name,
                    uid: uid.as_deref(),
                    main_device_id: *main_device_id,
                    other_device_ids,
                    multi_output: *multi_output,
                },
                format(*json),
            )
            .map(Some),
            AggregateCommand::Destroy { device_id } => {
                aggregate::destroy(store, *device_id).map(|_| None)
            }
        },
    }
}

fn run_role(
    store: &dyn PropertyStore,
    role: DeviceRole,
    action: &RoleCommand,
    format: &dyn Fn(bool) -> Format,
) -> Result<Option<String>> {
    match action {
        RoleCommand::Get { json } => defaults::get(store, role, format(*json)).map(Some),
        RoleCommand::Set { device_id } => defaults::set(store, role, *device_id).map(|_| None),
    }
}
