// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types passed between the host, its plugin, and its transport.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AerohostError;
use crate::mode::ControlMode;
use crate::traits::Clock;

/// Manifest export tag listing the modes a plugin accepts.
pub const INPUT_MODES_TAG: &str = "input_control_modes";

/// Manifest export tag listing the modes a plugin produces.
pub const OUTPUT_MODES_TAG: &str = "output_control_modes";

/// A timestamped snapshot of the active control mode.
///
/// Built fresh on every publish tick; it has no identity beyond its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub timestamp: DateTime<Utc>,
    /// Packed [`ControlMode`] value.
    pub control_mode: u32,
}

impl StatusMessage {
    pub fn new(timestamp: DateTime<Utc>, mode: ControlMode) -> Self {
        Self {
            timestamp,
            control_mode: mode.pack(),
        }
    }

    /// Decodes the carried mode.
    pub fn mode(&self) -> Result<ControlMode, AerohostError> {
        ControlMode::unpack(self.control_mode)
    }
}

/// The loaded plugin's qualified name and the directory holding its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    name: String,
    manifest_dir: PathBuf,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, manifest_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            manifest_dir: manifest_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest_dir(&self) -> &Path {
        &self.manifest_dir
    }
}

/// Runtime context handed to a plugin's `initialize`.
///
/// Carries the parameters the host reads on the plugin's behalf but never
/// interprets itself.
#[derive(Clone)]
pub struct PluginContext {
    pub plugin_name: String,
    pub publish_cmd_freq: f64,
    pub use_bypass: bool,
    pub plugin_config_file: Option<PathBuf>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin_name", &self.plugin_name)
            .field("publish_cmd_freq", &self.publish_cmd_freq)
            .field("use_bypass", &self.use_bypass)
            .field("plugin_config_file", &self.plugin_config_file)
            .finish_non_exhaustive()
    }
}
