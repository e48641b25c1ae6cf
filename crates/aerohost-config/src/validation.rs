// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as positive frequencies and a well-formed plugin name.

use crate::diagnostic::ConfigError;
use crate::model::AerohostConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest accepted `host.status_buffer`.
pub const MAX_STATUS_BUFFER: usize = 65_536;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AerohostConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let controller = &config.controller;

    if controller.plugin_name.is_none() {
        errors.push(ConfigError::MissingKey {
            key: "controller.plugin_name".to_string(),
        });
    } else if let Err(e) = controller.plugin_name() {
        errors.push(ConfigError::Validation {
            message: e.to_string(),
        });
    }

    for (key, value) in [
        ("controller.publish_info_freq", controller.publish_info_freq),
        ("controller.publish_cmd_freq", controller.publish_cmd_freq),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be a positive frequency in Hz, got {value}"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.host.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "host.log_level `{}` must be one of: {}",
                config.host.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.host.status_topic.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "host.status_topic must not be empty".to_string(),
        });
    }

    if !(1..=MAX_STATUS_BUFFER).contains(&config.host.status_buffer) {
        errors.push(ConfigError::Validation {
            message: format!(
                "host.status_buffer must be between 1 and {MAX_STATUS_BUFFER}, got {}",
                config.host.status_buffer
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
