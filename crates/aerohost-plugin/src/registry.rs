// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of controller plugin factories keyed by qualified name.
//!
//! The registry is the host's [`PluginLoader`]. Each entry maps a name such as
//! `controller_plugin_pid::PidController` to a factory. Manifests are found at
//! `<manifest_root>/<package>/plugin.toml`, where `<package>` is the part of
//! the name before the first `::`, unless the entry was registered with an
//! explicit manifest path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use aerohost_core::{AerohostError, ControllerPlugin, PluginLoader};
use tracing::{debug, info};

use crate::manifest::MANIFEST_FILE;

/// Creates controller plugin instances.
pub trait ControllerFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn ControllerPlugin>, AerohostError>;
}

impl<F> ControllerFactory for F
where
    F: Fn() -> Result<Box<dyn ControllerPlugin>, AerohostError> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn ControllerPlugin>, AerohostError> {
        self()
    }
}

/// A single entry in the plugin registry.
pub struct PluginEntry {
    pub name: String,
    pub factory: Box<dyn ControllerFactory>,
    /// Overrides the manifest-root lookup when set.
    pub manifest_path: Option<PathBuf>,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("name", &self.name)
            .field("manifest_path", &self.manifest_path)
            .finish_non_exhaustive()
    }
}

/// Registry of controller plugins available to the host.
pub struct PluginRegistry {
    manifest_root: PathBuf,
    entries: HashMap<String, PluginEntry>,
}

impl PluginRegistry {
    /// Create an empty registry resolving manifests under `manifest_root`.
    pub fn new(manifest_root: impl Into<PathBuf>) -> Self {
        Self {
            manifest_root: manifest_root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn manifest_root(&self) -> &Path {
        &self.manifest_root
    }

    /// Register a factory whose manifest lives under the manifest root.
    pub fn register(&mut self, name: impl Into<String>, factory: impl ControllerFactory + 'static) {
        self.insert(name.into(), Box::new(factory), None);
    }

    /// Register a factory with an explicit manifest file.
    pub fn register_with_manifest(
        &mut self,
        name: impl Into<String>,
        factory: impl ControllerFactory + 'static,
        manifest_path: impl Into<PathBuf>,
    ) {
        self.insert(name.into(), Box::new(factory), Some(manifest_path.into()));
    }

    fn insert(
        &mut self,
        name: String,
        factory: Box<dyn ControllerFactory>,
        manifest_path: Option<PathBuf>,
    ) {
        debug!(plugin = %name, "registering controller plugin");
        self.entries.insert(
            name.clone(),
            PluginEntry {
                name,
                factory,
                manifest_path,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&PluginEntry, AerohostError> {
        self.entries.get(name).ok_or_else(|| AerohostError::PluginLoad {
            name: name.to_string(),
            message: format!(
                "no plugin registered under this name (known: {})",
                self.names().join(", ")
            ),
        })
    }
}

/// Package part of a qualified plugin name (`pkg::Type` -> `pkg`).
pub fn package_of(name: &str) -> &str {
    name.split("::").next().unwrap_or(name)
}

impl PluginLoader for PluginRegistry {
    fn instantiate(&self, name: &str) -> Result<Box<dyn ControllerPlugin>, AerohostError> {
        let entry = self.entry(name)?;
        let plugin = entry.factory.create().map_err(|e| match e {
            AerohostError::PluginLoad { .. } => e,
            other => AerohostError::PluginLoad {
                name: name.to_string(),
                message: other.to_string(),
            },
        })?;
        info!(plugin = name, "controller plugin instantiated");
        Ok(plugin)
    }

    fn manifest_path_of(&self, name: &str) -> Result<PathBuf, AerohostError> {
        let entry = self.entry(name)?;
        Ok(entry.manifest_path.clone().unwrap_or_else(|| {
            self.manifest_root
                .join(package_of(name))
                .join(MANIFEST_FILE)
        }))
    }
}
