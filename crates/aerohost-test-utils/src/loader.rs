// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin loader double.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use aerohost_core::{AerohostError, ControllerPlugin, PluginLoader};

/// Hands out one pre-built plugin and reports a fixed manifest path.
pub struct StubLoader {
    plugin: Mutex<Option<Box<dyn ControllerPlugin>>>,
    manifest_path: PathBuf,
    instantiate_calls: AtomicUsize,
    manifest_calls: AtomicUsize,
}

impl StubLoader {
    pub fn new(plugin: impl ControllerPlugin, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            plugin: Mutex::new(Some(Box::new(plugin))),
            manifest_path: manifest_path.into(),
            instantiate_calls: AtomicUsize::new(0),
            manifest_calls: AtomicUsize::new(0),
        }
    }

    /// A loader that has nothing to instantiate.
    pub fn empty(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            plugin: Mutex::new(None),
            manifest_path: manifest_path.into(),
            instantiate_calls: AtomicUsize::new(0),
            manifest_calls: AtomicUsize::new(0),
        }
    }

    pub fn instantiate_calls(&self) -> usize {
        self.instantiate_calls.load(Ordering::SeqCst)
    }

    pub fn manifest_calls(&self) -> usize {
        self.manifest_calls.load(Ordering::SeqCst)
    }
}

impl PluginLoader for StubLoader {
    fn instantiate(&self, name: &str) -> Result<Box<dyn ControllerPlugin>, AerohostError> {
        self.instantiate_calls.fetch_add(1, Ordering::SeqCst);
        self.plugin
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or_else(|| AerohostError::PluginLoad {
                name: name.to_string(),
                message: "stub loader has no plugin".to_string(),
            })
    }

    fn manifest_path_of(&self, _name: &str) -> Result<PathBuf, AerohostError> {
        self.manifest_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.manifest_path.clone())
    }
}
