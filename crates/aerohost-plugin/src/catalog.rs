// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in controller catalog.
//!
//! Controllers compiled into the `aerohost` binary. Their manifests are still
//! read from the manifest root at startup, like any other plugin.

use std::path::PathBuf;

use aerohost_core::{AerohostError, ControllerPlugin};

use crate::passthrough::{PASSTHROUGH_PLUGIN, PassthroughController};
use crate::registry::PluginRegistry;

fn passthrough() -> Result<Box<dyn ControllerPlugin>, AerohostError> {
    Ok(Box::new(PassthroughController::new()))
}

/// Qualified names of every built-in controller.
pub fn builtin_names() -> Vec<&'static str> {
    vec![PASSTHROUGH_PLUGIN]
}

/// A registry pre-populated with the built-in controllers.
pub fn builtin_registry(manifest_root: impl Into<PathBuf>) -> PluginRegistry {
    let mut registry = PluginRegistry::new(manifest_root);
    registry.register(PASSTHROUGH_PLUGIN, passthrough);
    registry
}
