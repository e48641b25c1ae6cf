// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aerohost serve` command implementation.
//!
//! Wires the built-in plugin registry, the broadcast status publisher, and
//! the controller host together, then runs until SIGINT or SIGTERM.

use std::sync::Arc;

use aerohost_config::AerohostConfig;
use aerohost_core::{AerohostError, StatusMessage, SystemClock};
use aerohost_host::{BroadcastPublisher, ControllerHost, install_signal_handler};
use aerohost_plugin::builtin_registry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Runs the `aerohost serve` command.
///
/// Startup errors are fatal: the host has already logged them with context,
/// and the caller exits non-zero.
pub async fn run_serve(config: AerohostConfig, print_status: bool) -> Result<(), AerohostError> {
    init_tracing(&config.host.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting aerohost serve");

    let registry = builtin_registry(&config.plugins.manifest_root);
    debug!(
        root = %registry.manifest_root().display(),
        plugins = ?registry.names(),
        "plugin registry initialized"
    );

    let publisher = BroadcastPublisher::new(&config.host.status_topic, config.host.status_buffer);
    let printer = print_status.then(|| spawn_status_printer(publisher.subscribe()));

    let mut host = ControllerHost::new(
        config.controller.clone(),
        Box::new(publisher),
        Arc::new(SystemClock),
    );
    host.start(&registry)?;

    let cancel = install_signal_handler();
    let published = host.run(cancel).await?;

    // The publisher was dropped with the host, which closes the channel.
    if let Some(printer) = printer
        && let Err(e) = printer.await
    {
        warn!(error = %e, "status printer task failed");
    }

    info!(published, "aerohost serve stopped");
    Ok(())
}

/// One status message as printed by `--print-status`.
#[derive(Debug, Serialize)]
struct StatusLine {
    timestamp: DateTime<Utc>,
    control_mode: u32,
    mode: String,
}

impl From<&StatusMessage> for StatusLine {
    fn from(msg: &StatusMessage) -> Self {
        Self {
            timestamp: msg.timestamp,
            control_mode: msg.control_mode,
            mode: msg
                .mode()
                .map(|m| m.to_string())
                .unwrap_or_else(|e| e.to_string()),
        }
    }
}

fn spawn_status_printer(mut rx: broadcast::Receiver<StatusMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => match serde_json::to_string(&StatusLine::from(&msg)) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!(error = %e, "failed to serialize status message"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "status printer lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Initialize the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aerohost={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerohost_core::{Clock, ControlMode};
    use aerohost_test_utils::SteppingClock;

    #[test]
    fn status_line_carries_descriptor() {
        let mode: ControlMode = "speed.yaw_speed.local_enu_frame".parse().unwrap();
        let clock = SteppingClock::new(chrono::Duration::milliseconds(10));
        let msg = StatusMessage::new(clock.now(), mode);

        let json = serde_json::to_value(StatusLine::from(&msg)).unwrap();
        assert_eq!(json["control_mode"], mode.pack());
        assert_eq!(json["mode"], "speed.yaw_speed.local_enu_frame");
        assert_eq!(json["timestamp"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn undecodable_status_is_still_printable() {
        let msg = StatusMessage {
            timestamp: SteppingClock::new(chrono::Duration::zero()).start(),
            control_mode: 0xFFFF,
        };
        let line = StatusLine::from(&msg);
        assert!(line.mode.contains("invalid control mode encoding"));
    }
}
