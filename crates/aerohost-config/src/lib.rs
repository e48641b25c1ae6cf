// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Aerohost controller host.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use aerohost_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("plugin: {:?}", config.controller.plugin_name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AerohostConfig, ControllerConfig, HostConfig, PluginsConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `AerohostConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<AerohostConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<AerohostConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AerohostConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Load configuration from `path` (or the XDG hierarchy when `None`) without
/// semantic validation.
///
/// For tools that only need part of the settings, such as inspecting a
/// plugin's modes when `controller.plugin_name` is given on the command line.
pub fn load_unvalidated(path: Option<&Path>) -> Result<AerohostConfig, Vec<ConfigError>> {
    let loaded = match path {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };
    loaded.map_err(|err| {
        let sources = match path {
            Some(path) => std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default(),
            None => collect_toml_sources(),
        };
        diagnostic::figment_to_config_errors(err, &sources)
    })
}

fn finish(
    loaded: Result<AerohostConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<AerohostConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                plugin = config.controller.plugin_name.as_deref().unwrap_or_default(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/aerohost/aerohost.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("aerohost/aerohost.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("aerohost.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
