// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference controller that forwards references without a control law.
//!
//! It reports the lowest output mode it was given (or `unset` when it has
//! none), which is enough to exercise the host end to end.

use aerohost_core::{AerohostError, ControlMode, ControllerPlugin, ModeSet, PluginContext};
use tracing::{info, warn};

/// Qualified name the passthrough controller is registered under.
pub const PASSTHROUGH_PLUGIN: &str = "controller_plugin_passthrough::Passthrough";

#[derive(Debug, Default)]
pub struct PassthroughController {
    initialized: bool,
    use_bypass: bool,
    input_modes: ModeSet,
    output_modes: ModeSet,
}

impl PassthroughController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_modes(&self) -> &ModeSet {
        &self.input_modes
    }

    pub fn output_modes(&self) -> &ModeSet {
        &self.output_modes
    }

    /// The bypass flag received at initialization.
    pub fn use_bypass(&self) -> bool {
        self.use_bypass
    }
}

impl ControllerPlugin for PassthroughController {
    fn initialize(&mut self, ctx: &PluginContext) -> Result<(), AerohostError> {
        if self.initialized {
            return Err(AerohostError::Configuration(format!(
                "{} initialized twice",
                ctx.plugin_name
            )));
        }
        if !ctx.use_bypass {
            warn!(
                plugin = %ctx.plugin_name,
                "passthrough controller has no control law; use_bypass=false is ignored"
            );
        }
        self.use_bypass = ctx.use_bypass;
        self.initialized = true;
        info!(
            plugin = %ctx.plugin_name,
            cmd_freq = ctx.publish_cmd_freq,
            "passthrough controller initialized"
        );
        Ok(())
    }

    fn set_available_input_modes(&mut self, modes: ModeSet) {
        self.input_modes = modes;
    }

    fn set_available_output_modes(&mut self, modes: ModeSet) {
        self.output_modes = modes;
    }

    fn current_mode(&self) -> ControlMode {
        self.output_modes.first().unwrap_or(ControlMode::UNSET)
    }
}
