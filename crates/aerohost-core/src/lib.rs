// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Aerohost controller host.
//!
//! This crate provides the control mode codec, the error taxonomy, and the
//! trait seams shared by the host, the plugin registry, and every control-law
//! plugin.

pub mod error;
pub mod mode;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AerohostError;
pub use mode::{ControlLaw, ControlMode, ModeSet, ReferenceFrame, YawMode, parse_modes};
pub use types::{
    INPUT_MODES_TAG, OUTPUT_MODES_TAG, PluginContext, PluginDescriptor, StatusMessage,
};

pub use traits::{Clock, ControllerPlugin, PluginLoader, StatusPublisher, SystemClock};
