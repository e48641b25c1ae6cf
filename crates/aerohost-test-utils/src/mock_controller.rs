// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controller double for asserting what the host does to its plugin.
//!
//! The host takes ownership of the controller, so assertions go through a
//! [`ControllerRecord`] that shares the controller's state.

use std::sync::{Arc, Mutex, MutexGuard};

use aerohost_core::{AerohostError, ControlMode, ControllerPlugin, ModeSet, PluginContext};

#[derive(Debug, Default)]
struct RecordState {
    calls: Vec<&'static str>,
    context_plugin_name: Option<String>,
    context_use_bypass: Option<bool>,
    input_modes: Option<ModeSet>,
    output_modes: Option<ModeSet>,
    mode: ControlMode,
    current_mode_reads: usize,
    dropped: bool,
}

/// Shared view onto a [`RecordingController`].
#[derive(Debug, Clone, Default)]
pub struct ControllerRecord {
    state: Arc<Mutex<RecordState>>,
}

impl ControllerRecord {
    fn lock(&self) -> MutexGuard<'_, RecordState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Method names in call order (`current_mode` excluded).
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn input_modes(&self) -> Option<ModeSet> {
        self.lock().input_modes.clone()
    }

    pub fn output_modes(&self) -> Option<ModeSet> {
        self.lock().output_modes.clone()
    }

    /// Plugin name seen by `initialize`.
    pub fn initialized_as(&self) -> Option<String> {
        self.lock().context_plugin_name.clone()
    }

    pub fn use_bypass(&self) -> Option<bool> {
        self.lock().context_use_bypass
    }

    /// Changes what `current_mode` reports from now on.
    pub fn set_mode(&self, mode: ControlMode) {
        self.lock().mode = mode;
    }

    pub fn current_mode_reads(&self) -> usize {
        self.lock().current_mode_reads
    }

    /// True once the host has released the controller.
    pub fn dropped(&self) -> bool {
        self.lock().dropped
    }
}

/// A controller that records every call the host makes.
#[derive(Debug, Default)]
pub struct RecordingController {
    record: ControllerRecord,
    fail_initialize: bool,
}

impl RecordingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller whose `initialize` fails.
    pub fn failing_initialize() -> Self {
        Self {
            record: ControllerRecord::default(),
            fail_initialize: true,
        }
    }

    pub fn record(&self) -> ControllerRecord {
        self.record.clone()
    }
}

impl ControllerPlugin for RecordingController {
    fn initialize(&mut self, ctx: &PluginContext) -> Result<(), AerohostError> {
        let mut state = self.record.lock();
        state.calls.push("initialize");
        state.context_plugin_name = Some(ctx.plugin_name.clone());
        state.context_use_bypass = Some(ctx.use_bypass);
        if self.fail_initialize {
            return Err(AerohostError::Configuration(
                "recording controller refused to initialize".to_string(),
            ));
        }
        Ok(())
    }

    fn set_available_input_modes(&mut self, modes: ModeSet) {
        let mut state = self.record.lock();
        state.calls.push("set_available_input_modes");
        state.input_modes = Some(modes);
    }

    fn set_available_output_modes(&mut self, modes: ModeSet) {
        let mut state = self.record.lock();
        state.calls.push("set_available_output_modes");
        state.output_modes = Some(modes);
    }

    fn current_mode(&self) -> ControlMode {
        let mut state = self.record.lock();
        state.current_mode_reads += 1;
        state.mode
    }
}

impl Drop for RecordingController {
    fn drop(&mut self) {
        self.record.lock().dropped = true;
    }
}
