// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin loader seam.

use std::path::PathBuf;

use crate::error::AerohostError;
use crate::traits::controller::ControllerPlugin;

/// Instantiates plugins by qualified name and locates their manifests.
pub trait PluginLoader {
    /// Creates a fresh instance of the named plugin.
    fn instantiate(&self, name: &str) -> Result<Box<dyn ControllerPlugin>, AerohostError>;

    /// Path of the named plugin's manifest file.
    fn manifest_path_of(&self, name: &str) -> Result<PathBuf, AerohostError>;
}
