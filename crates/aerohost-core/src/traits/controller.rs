// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability contract every control-law plugin implements.

use crate::error::AerohostError;
use crate::mode::{ControlMode, ModeSet};
use crate::types::PluginContext;

/// A loaded control-law plugin, as seen by the host.
///
/// The host owns the plugin exclusively for the life of the process and
/// drives it in a fixed order:
///
/// 1. [`initialize`](ControllerPlugin::initialize) once.
/// 2. [`set_available_input_modes`](ControllerPlugin::set_available_input_modes)
///    and [`set_available_output_modes`](ControllerPlugin::set_available_output_modes)
///    once each.
/// 3. [`current_mode`](ControllerPlugin::current_mode) at any rate until shutdown.
///
/// The host never looks at the control algorithm itself.
pub trait ControllerPlugin: Send + 'static {
    /// One-time setup with the host's runtime context.
    fn initialize(&mut self, ctx: &PluginContext) -> Result<(), AerohostError>;

    /// Installs the modes the plugin may be commanded in.
    fn set_available_input_modes(&mut self, modes: ModeSet);

    /// Installs the modes the plugin may produce.
    fn set_available_output_modes(&mut self, modes: ModeSet);

    /// The mode the plugin is operating in right now. Must not fail and must
    /// not have side effects.
    fn current_mode(&self) -> ControlMode;
}
