// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aerohost modes`, `encode`, and `decode` commands.
//!
//! These inspect manifests and the mode codec without instantiating any
//! plugin.

use std::path::PathBuf;

use aerohost_config::AerohostConfig;
use aerohost_core::{
    AerohostError, ControlMode, INPUT_MODES_TAG, ModeSet, OUTPUT_MODES_TAG, parse_modes,
};
use aerohost_host::resolve_manifest_path;
use aerohost_plugin::{builtin_registry, read_modes_from};
use serde::Serialize;

/// A parsed mode with its packed value.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ModeEntry {
    descriptor: String,
    value: u32,
}

/// Both mode sets declared by a plugin manifest.
#[derive(Debug, Serialize)]
struct ModesReport {
    plugin: String,
    manifest: PathBuf,
    input_control_modes: Vec<ModeEntry>,
    output_control_modes: Vec<ModeEntry>,
}

fn entries(modes: &ModeSet) -> Vec<ModeEntry> {
    modes
        .iter()
        .map(|m| ModeEntry {
            descriptor: m.to_string(),
            value: m.pack(),
        })
        .collect()
}

fn collect_modes(
    config: &AerohostConfig,
    plugin: Option<&str>,
) -> Result<ModesReport, AerohostError> {
    let mut controller = config.controller.clone();
    if let Some(name) = plugin {
        // A plugin named on the command line ignores the configured override,
        // which belongs to the configured plugin.
        controller.plugin_name = Some(name.to_string());
        controller.plugin_available_modes_config_file.clear();
    }
    let name = controller.plugin_name()?.to_string();

    let registry = builtin_registry(&config.plugins.manifest_root);
    let manifest = resolve_manifest_path(&controller, &registry, &name)?;

    let input = parse_modes(read_modes_from(&manifest, INPUT_MODES_TAG)?)?;
    let output = parse_modes(read_modes_from(&manifest, OUTPUT_MODES_TAG)?)?;

    Ok(ModesReport {
        plugin: name,
        manifest,
        input_control_modes: entries(&input),
        output_control_modes: entries(&output),
    })
}

/// Runs `aerohost modes`.
pub fn run_modes(
    config: &AerohostConfig,
    plugin: Option<&str>,
    json: bool,
) -> Result<(), AerohostError> {
    let report = collect_modes(config, plugin)?;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AerohostError::Configuration(format!("failed to serialize modes: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    println!("plugin:   {}", report.plugin);
    println!("manifest: {}", report.manifest.display());
    for (tag, modes) in [
        (INPUT_MODES_TAG, &report.input_control_modes),
        (OUTPUT_MODES_TAG, &report.output_control_modes),
    ] {
        println!();
        println!("{tag} ({})", modes.len());
        for entry in modes {
            println!("  {:>3}  {:#010b}  {}", entry.value, entry.value, entry.descriptor);
        }
    }
    Ok(())
}

/// Runs `aerohost encode`.
pub fn run_encode(descriptor: &str) -> Result<(), AerohostError> {
    let mode: ControlMode = descriptor.parse()?;
    println!("{}", mode.pack());
    Ok(())
}

/// Runs `aerohost decode`.
pub fn run_decode(value: u32) -> Result<(), AerohostError> {
    println!("{}", ControlMode::unpack(value)?);
    Ok(())
}
