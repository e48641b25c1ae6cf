// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifests (`plugin.toml`) and their exported mode tags.
//!
//! A manifest sits in its own directory next to the plugin it describes:
//!
//! ```toml
//! [plugin]
//! name = "controller_plugin_pid::PidController"
//! version = "0.3.1"
//! description = "PID position and speed controller"
//!
//! [export]
//! input_control_modes = "hover.none.undefined_frame, position.yaw_angle.local_enu_frame"
//! output_control_modes = ["acro.yaw_speed.body_flu_frame"]
//! ```
//!
//! An export is either one string of comma- or whitespace-separated tokens,
//! or an array of strings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aerohost_core::AerohostError;
use serde::Deserialize;
use tracing::debug;

/// File name of a plugin manifest inside its directory.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Parsed plugin manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginManifest {
    /// Qualified plugin name.
    pub name: String,
    pub version: semver::Version,
    pub description: String,
    pub author: Option<String>,
    /// Export tags, already split into tokens.
    pub exports: BTreeMap<String, Vec<String>>,
}

impl PluginManifest {
    /// Tokens of one export tag, if present.
    pub fn export(&self, tag: &str) -> Option<&[String]> {
        self.exports.get(tag).map(Vec::as_slice)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    plugin: PluginSection,
    #[serde(default)]
    export: BTreeMap<String, ExportValue>,
}

#[derive(Debug, Deserialize)]
struct PluginSection {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportValue {
    Text(String),
    List(Vec<String>),
}

impl ExportValue {
    fn tokens(&self) -> Vec<String> {
        match self {
            ExportValue::Text(raw) => split_tokens(raw),
            ExportValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn manifest_file(manifest_dir: &Path) -> PathBuf {
    manifest_dir.join(MANIFEST_FILE)
}

fn read_manifest_text(path: &Path) -> Result<String, AerohostError> {
    std::fs::read_to_string(path).map_err(|e| AerohostError::ManifestUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Reads one export tag from the `plugin.toml` in `manifest_dir` and splits it
/// into raw mode tokens.
pub fn read_modes(manifest_dir: &Path, tag: &str) -> Result<Vec<String>, AerohostError> {
    read_modes_from(&manifest_file(manifest_dir), tag)
}

/// Reads one export tag from the manifest file at `path`, whatever its name.
///
/// Only the `[export]` table is consulted, so a modes-only manifest without a
/// `[plugin]` section is accepted. Nothing is cached.
pub fn read_modes_from(path: &Path, tag: &str) -> Result<Vec<String>, AerohostError> {
    let content = read_manifest_text(path)?;
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| AerohostError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason: format!("invalid TOML: {}", e.message()),
        })?;

    let value = table
        .get("export")
        .and_then(toml::Value::as_table)
        .and_then(|export| export.get(tag))
        .ok_or_else(|| AerohostError::ManifestTagMissing {
            path: path.to_path_buf(),
            tag: tag.to_string(),
        })?;
    let export = ExportValue::deserialize(value.clone()).map_err(|_| {
        AerohostError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason: format!(
                "export `{tag}` must be a string or an array of strings, found {}",
                describe_value(value)
            ),
        }
    })?;

    let tokens = export.tokens();
    debug!(manifest = %path.display(), tag, count = tokens.len(), "read manifest modes");
    Ok(tokens)
}

fn describe_value(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::Array(_) => "array with non-string items",
        other => other.type_str(),
    }
}

/// Parses a full plugin manifest from TOML content.
///
/// `origin` is only used for error context. Validates that the name is
/// non-empty and that the version is valid semver.
pub fn parse_plugin_manifest(
    toml_content: &str,
    origin: &Path,
) -> Result<PluginManifest, AerohostError> {
    let invalid = |reason: String| AerohostError::ManifestUnreadable {
        path: origin.to_path_buf(),
        reason,
    };

    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| invalid(format!("invalid plugin manifest: {}", e.message())))?;
    let section = file.plugin;

    if section.name.trim().is_empty() {
        return Err(invalid("plugin.name must not be empty".to_string()));
    }
    let version = semver::Version::parse(&section.version).map_err(|e| {
        invalid(format!(
            "plugin.version `{}` is not valid semver: {e}",
            section.version
        ))
    })?;

    Ok(PluginManifest {
        name: section.name,
        version,
        description: section.description,
        author: section.author,
        exports: file
            .export
            .iter()
            .map(|(tag, value)| (tag.clone(), value.tokens()))
            .collect(),
    })
}

/// Reads and parses the full manifest in `manifest_dir`.
pub fn load_plugin_manifest(manifest_dir: &Path) -> Result<PluginManifest, AerohostError> {
    let path = manifest_file(manifest_dir);
    let content = read_manifest_text(&path)?;
    parse_plugin_manifest(&content, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[plugin]
name = "controller_plugin_pid::PidController"
version = "0.3.1"
description = "PID position and speed controller"
author = "Aerohost Contributors"

[export]
input_control_modes = "hover.none.undefined_frame, position.yaw_angle.local_enu_frame"
output_control_modes = ["acro.yaw_speed.body_flu_frame", " "]
"#;

    #[test]
    fn parse_valid_manifest() {
        let manifest = parse_plugin_manifest(FULL, Path::new("plugin.toml")).unwrap();
        assert_eq!(manifest.name, "controller_plugin_pid::PidController");
        assert_eq!(manifest.version, semver::Version::new(0, 3, 1));
        assert_eq!(manifest.author.as_deref(), Some("Aerohost Contributors"));
        assert_eq!(
            manifest.export("input_control_modes").unwrap(),
            ["hover.none.undefined_frame", "position.yaw_angle.local_enu_frame"]
        );
        assert_eq!(
            manifest.export("output_control_modes").unwrap(),
            ["acro.yaw_speed.body_flu_frame"]
        );
        assert!(manifest.export("missing").is_none());
    }

    #[test]
    fn parse_rejects_bad_version() {
        let toml = "[plugin]\nname = \"a::B\"\nversion = \"one\"\n";
        let err = parse_plugin_manifest(toml, Path::new("x/plugin.toml")).unwrap_err();
        assert!(err.to_string().contains("not valid semver"));
        assert!(err.to_string().contains("x/plugin.toml"));
    }

    #[test]
    fn parse_rejects_empty_name() {
        let toml = "[plugin]\nname = \" \"\nversion = \"1.0.0\"\n";
        let err = parse_plugin_manifest(toml, Path::new("plugin.toml")).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = "[plugin]\nname = \"a::B\"\nversion = \"1.0.0\"\n";
        let manifest = parse_plugin_manifest(toml, Path::new("plugin.toml")).unwrap();
        assert!(manifest.exports.is_empty());
        assert!(manifest.description.is_empty());
        assert!(manifest.author.is_none());
    }

    #[test]
    fn split_tokens_handles_commas_and_whitespace() {
        assert_eq!(
            split_tokens(" a.b.c ,d.e.f\n\tg.h.i,, "),
            vec!["a.b.c", "d.e.f", "g.h.i"]
        );
        assert!(split_tokens("   ").is_empty());
    }
}
