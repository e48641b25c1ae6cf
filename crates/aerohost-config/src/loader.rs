// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./aerohost.toml` > `~/.config/aerohost/aerohost.toml` > `/etc/aerohost/aerohost.toml`
//! with environment variable overrides via `AEROHOST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AerohostConfig;

/// Config sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &["controller", "plugins", "host"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aerohost/aerohost.toml` (system-wide)
/// 3. `~/.config/aerohost/aerohost.toml` (user XDG config)
/// 4. `./aerohost.toml` (local directory)
/// 5. `AEROHOST_*` environment variables
pub fn load_config() -> Result<AerohostConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AerohostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AerohostConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AerohostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AerohostConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AerohostConfig::default()))
        .merge(Toml::file("/etc/aerohost/aerohost.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("aerohost/aerohost.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("aerohost.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `AEROHOST_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `AEROHOST_CONTROLLER_PLUGIN_NAME` maps to `controller.plugin_name`.
fn env_provider() -> Env {
    Env::prefixed("AEROHOST_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env key, in any case, onto a dotted config path.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
            .filter(|r| !r.is_empty())
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
