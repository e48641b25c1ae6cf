// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, manifest reader, and built-in controller catalog.
//!
//! Controllers are compiled-in factories keyed by qualified name. Each one
//! ships a `plugin.toml` manifest whose `[export]` table declares the control
//! modes it accepts and produces.

pub mod catalog;
pub mod manifest;
pub mod passthrough;
pub mod registry;

pub use catalog::{builtin_names, builtin_registry};
pub use manifest::{
    MANIFEST_FILE, PluginManifest, load_plugin_manifest, parse_plugin_manifest, read_modes,
    read_modes_from,
};
pub use passthrough::{PASSTHROUGH_PLUGIN, PassthroughController};
pub use registry::{ControllerFactory, PluginEntry, PluginRegistry, package_of};
