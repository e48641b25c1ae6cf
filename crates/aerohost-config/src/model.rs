// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Aerohost controller host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::{Path, PathBuf};

use aerohost_core::AerohostError;
use serde::{Deserialize, Serialize};

/// Top-level Aerohost configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AerohostConfig {
    /// Process-level settings (logging, status transport).
    #[serde(default)]
    pub host: HostConfig,

    /// Controller plugin parameters.
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Plugin registry settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Topic the controller status is published on.
    #[serde(default = "default_status_topic")]
    pub status_topic: String,

    /// Capacity of the status broadcast channel.
    #[serde(default = "default_status_buffer")]
    pub status_buffer: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            status_topic: default_status_topic(),
            status_buffer: default_status_buffer(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_status_topic() -> String {
    "controller/info".to_string()
}

fn default_status_buffer() -> usize {
    64
}

/// Parameters of the controller plugin.
///
/// Only `publish_info_freq`, `plugin_name` and
/// `plugin_available_modes_config_file` are interpreted by the host. The rest
/// are forwarded to the plugin.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Rate at which the plugin publishes actuator commands, in Hz.
    #[serde(default = "default_publish_cmd_freq")]
    pub publish_cmd_freq: f64,

    /// Rate at which the host publishes controller status, in Hz.
    #[serde(default = "default_publish_info_freq")]
    pub publish_info_freq: f64,

    /// Qualified plugin name, e.g. `controller_plugin_pid::PidController`.
    #[serde(default)]
    pub plugin_name: Option<String>,

    /// Let the plugin pass references straight through when it can.
    #[serde(default = "default_use_bypass")]
    pub use_bypass: bool,

    /// Plugin-specific configuration file. Never opened by the host.
    #[serde(default)]
    pub plugin_config_file: Option<PathBuf>,

    /// Explicit manifest location. Empty means "ask the loader".
    #[serde(default)]
    pub plugin_available_modes_config_file: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            publish_cmd_freq: default_publish_cmd_freq(),
            publish_info_freq: default_publish_info_freq(),
            plugin_name: None,
            use_bypass: default_use_bypass(),
            plugin_config_file: None,
            plugin_available_modes_config_file: String::new(),
        }
    }
}

impl ControllerConfig {
    /// The configured plugin name.
    ///
    /// Fails when it is absent, blank, or not of the form `package::Type`.
    pub fn plugin_name(&self) -> Result<&str, AerohostError> {
        let name = self
            .plugin_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                AerohostError::Configuration("controller.plugin_name is required".to_string())
            })?;
        if !is_qualified_name(name) {
            return Err(AerohostError::Configuration(format!(
                "controller.plugin_name `{name}` is not a qualified `package::Type` name"
            )));
        }
        Ok(name)
    }

    /// The explicit manifest override, if one is set.
    pub fn manifest_override(&self) -> Option<&Path> {
        let raw = self.plugin_available_modes_config_file.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Path::new(raw))
        }
    }
}

fn default_publish_cmd_freq() -> f64 {
    100.0
}

fn default_publish_info_freq() -> f64 {
    10.0
}

fn default_use_bypass() -> bool {
    true
}

/// Plugin registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directory holding one `<package>/plugin.toml` per installed plugin.
    #[serde(default = "default_manifest_root")]
    pub manifest_root: PathBuf,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            manifest_root: default_manifest_root(),
        }
    }
}

fn default_manifest_root() -> PathBuf {
    PathBuf::from("plugins")
}

/// Checks for `segment(::segment)+`, each segment an identifier.
pub fn is_qualified_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split("::").collect();
    segments.len() >= 2 && segments.iter().all(|s| is_identifier(s))
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        assert!(is_qualified_name("controller_plugin_pid::PidController"));
        assert!(is_qualified_name("a::b::C2"));
        assert!(!is_qualified_name("PidController"));
        assert!(!is_qualified_name("pkg::"));
        assert!(!is_qualified_name("::Type"));
        assert!(!is_qualified_name("pkg::9Type"));
        assert!(!is_qualified_name("pkg::Pid Controller"));
    }

    #[test]
    fn plugin_name_required() {
        let config = ControllerConfig::default();
        let err = config.plugin_name().unwrap_err();
        assert!(err.to_string().contains("plugin_name is required"));

        let blank = ControllerConfig {
            plugin_name: Some("   ".to_string()),
            ..ControllerConfig::default()
        };
        assert!(blank.plugin_name().is_err());
    }

    #[test]
    fn plugin_name_trimmed() {
        let config = ControllerConfig {
            plugin_name: Some(" pkg::Type ".to_string()),
            ..ControllerConfig::default()
        };
        assert_eq!(config.plugin_name().unwrap(), "pkg::Type");
    }

    #[test]
    fn manifest_override_empty_means_none() {
        let mut config = ControllerConfig::default();
        assert!(config.manifest_override().is_none());
        config.plugin_available_modes_config_file = "  ".to_string();
        assert!(config.manifest_override().is_none());
        config.plugin_available_modes_config_file = "/opt/modes".to_string();
        assert_eq!(config.manifest_override(), Some(Path::new("/opt/modes")));
    }
}
