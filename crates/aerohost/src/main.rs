// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aerohost - controller host for pluggable control laws.
//!
//! This is the binary entry point.

mod modes;
mod serve;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aerohost_config::AerohostConfig;
use clap::{Parser, Subcommand};

/// Aerohost - runs one control-law plugin and publishes its active control mode.
#[derive(Parser, Debug)]
#[command(name = "aerohost", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configured controller plugin and publish its status until stopped.
    Serve {
        /// Print every status message to stdout as a JSON line.
        #[arg(long)]
        print_status: bool,
    },
    /// Show the control modes a plugin's manifest declares.
    Modes {
        /// Qualified plugin name; defaults to `controller.plugin_name`.
        #[arg(long)]
        plugin: Option<String>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Pack a `control.yaw.frame` descriptor into its numeric value.
    Encode {
        descriptor: String,
    },
    /// Unpack a numeric control mode into its descriptor.
    Decode {
        value: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve { print_status }) => {
            let config = load_validated(cli.config.as_deref());
            serve::run_serve(config, print_status).await
        }
        Some(Commands::Modes { plugin, json }) => {
            let config = load_unvalidated(cli.config.as_deref());
            modes::run_modes(&config, plugin.as_deref(), json)
        }
        Some(Commands::Encode { descriptor }) => modes::run_encode(&descriptor),
        Some(Commands::Decode { value }) => modes::run_decode(value),
        None => {
            println!("aerohost: use --help for available commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_validated(path: Option<&Path>) -> AerohostConfig {
    let loaded = match path {
        Some(path) => aerohost_config::load_and_validate_path(path),
        None => aerohost_config::load_and_validate(),
    };
    loaded.unwrap_or_else(|errors| {
        aerohost_config::render_errors(&errors);
        std::process::exit(1);
    })
}

fn load_unvalidated(path: Option<&Path>) -> AerohostConfig {
    aerohost_config::load_unvalidated(path).unwrap_or_else(|errors| {
        aerohost_config::render_errors(&errors);
        std::process::exit(1);
    })
}
