// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controller host for the Aerohost runtime.
//!
//! The [`ControllerHost`] is the central coordinator that:
//! - Loads one control-law plugin by qualified name
//! - Reads and parses the plugin's available control modes from its manifest
//! - Installs both mode sets into the plugin
//! - Publishes the plugin's current mode on a fixed period
//! - Releases the plugin on graceful shutdown

pub mod host;
pub mod publisher;
pub mod shutdown;

pub use host::{
    ControllerHost, HostState, NegotiatedModes, resolve_manifest_path, status_period,
};
pub use publisher::BroadcastPublisher;
pub use shutdown::install_signal_handler;
