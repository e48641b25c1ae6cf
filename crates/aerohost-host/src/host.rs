// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controller host lifecycle.
//!
//! The [`ControllerHost`] loads exactly one control-law plugin, negotiates its
//! input and output control modes from the plugin manifest, and then publishes
//! the plugin's current mode on a fixed period until cancelled.
//!
//! ```text
//! Uninitialized -> PluginLoading -> ModeConfiguring -> Running -> ShuttingDown
//!        \               \                 \
//!         +---------------+-----------------+--> Failed
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use aerohost_config::ControllerConfig;
use aerohost_core::{
    AerohostError, Clock, ControllerPlugin, INPUT_MODES_TAG, ModeSet, OUTPUT_MODES_TAG,
    PluginContext, PluginDescriptor, PluginLoader, StatusMessage, StatusPublisher, parse_modes,
};
use aerohost_plugin::{MANIFEST_FILE, read_modes_from};
use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Lifecycle state of a [`ControllerHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HostState {
    Uninitialized,
    PluginLoading,
    ModeConfiguring,
    Running,
    ShuttingDown,
    Failed,
}

/// The input and output mode sets installed into the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedModes {
    pub input: ModeSet,
    pub output: ModeSet,
}

/// Hosts a single controller plugin and publishes its status.
pub struct ControllerHost {
    config: ControllerConfig,
    state: HostState,
    plugin: Option<Box<dyn ControllerPlugin>>,
    descriptor: Option<PluginDescriptor>,
    modes: Option<NegotiatedModes>,
    publisher: Box<dyn StatusPublisher>,
    clock: Arc<dyn Clock>,
    period: Duration,
    last_stamp: Option<DateTime<Utc>>,
}

impl ControllerHost {
    pub fn new(
        config: ControllerConfig,
        publisher: Box<dyn StatusPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            state: HostState::Uninitialized,
            plugin: None,
            descriptor: None,
            modes: None,
            publisher,
            clock,
            period: Duration::ZERO,
            last_stamp: None,
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Name and manifest directory of the loaded plugin, once modes are configured.
    pub fn descriptor(&self) -> Option<&PluginDescriptor> {
        self.descriptor.as_ref()
    }

    /// Modes installed into the plugin, once startup succeeded.
    pub fn modes(&self) -> Option<&NegotiatedModes> {
        self.modes.as_ref()
    }

    /// Status publication period derived from `publish_info_freq`.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs the startup sequence: load the plugin, read and parse both mode
    /// sets from its manifest, install them, and prepare the status period.
    ///
    /// Any failure leaves the host in [`HostState::Failed`] with no plugin
    /// held and no mode set installed. Nothing is retried.
    pub fn start(&mut self, loader: &dyn PluginLoader) -> Result<(), AerohostError> {
        if self.state != HostState::Uninitialized {
            return Err(AerohostError::Configuration(format!(
                "controller host cannot start from state {}",
                self.state
            )));
        }

        match self.try_start(loader) {
            Ok(()) => Ok(()),
            Err(e) => {
                let during = self.state;
                self.plugin = None;
                self.descriptor = None;
                self.modes = None;
                self.transition(HostState::Failed);
                error!(
                    error = %e,
                    during = %during,
                    plugin = self.config.plugin_name.as_deref().unwrap_or("<unset>"),
                    "FATAL: controller host startup failed"
                );
                Err(e)
            }
        }
    }

    fn try_start(&mut self, loader: &dyn PluginLoader) -> Result<(), AerohostError> {
        let name = self.config.plugin_name()?.to_string();
        let period = status_period(self.config.publish_info_freq)?;

        self.transition(HostState::PluginLoading);
        info!(plugin = %name, "loading controller plugin");
        let mut plugin = loader.instantiate(&name)?;

        self.transition(HostState::ModeConfiguring);
        let ctx = PluginContext {
            plugin_name: name.clone(),
            publish_cmd_freq: self.config.publish_cmd_freq,
            use_bypass: self.config.use_bypass,
            plugin_config_file: self.config.plugin_config_file.clone(),
            clock: Arc::clone(&self.clock),
        };
        plugin.initialize(&ctx).map_err(|e| match e {
            AerohostError::PluginLoad { .. } => e,
            other => AerohostError::PluginLoad {
                name: name.clone(),
                message: format!("initialization failed: {other}"),
            },
        })?;

        let manifest = resolve_manifest_path(&self.config, loader, &name)?;
        debug!(plugin = %name, manifest = %manifest.display(), "reading plugin manifest");

        let input = parse_modes(read_modes_from(&manifest, INPUT_MODES_TAG)?)?;
        let output = parse_modes(read_modes_from(&manifest, OUTPUT_MODES_TAG)?)?;
        let manifest_dir = manifest.parent().map(Path::to_path_buf).unwrap_or_default();

        info!(
            plugin = %name,
            input_modes = input.len(),
            output_modes = output.len(),
            "control modes negotiated"
        );
        debug!(input = %input, output = %output, "available control modes");

        plugin.set_available_input_modes(input.clone());
        plugin.set_available_output_modes(output.clone());

        self.plugin = Some(plugin);
        self.descriptor = Some(PluginDescriptor::new(name, manifest_dir));
        self.modes = Some(NegotiatedModes { input, output });
        self.period = period;
        self.transition(HostState::Running);
        Ok(())
    }

    /// Publishes status on every period until `cancel` fires, then stops the
    /// timer and releases the plugin in that order.
    ///
    /// Returns the number of status messages published.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<u64, AerohostError> {
        if self.state != HostState::Running {
            return Err(AerohostError::Configuration(format!(
                "controller host cannot run from state {}",
                self.state
            )));
        }

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            topic = self.publisher.topic(),
            period_ms = self.period.as_millis() as u64,
            "publishing controller status"
        );

        let mut published = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping status publication");
                    break;
                }
                _ = interval.tick() => {
                    if self.publish_status() {
                        published += 1;
                    }
                }
            }
        }

        self.transition(HostState::ShuttingDown);
        drop(interval);
        if let Some(plugin) = self.plugin.take() {
            drop(plugin);
            debug!("controller plugin released");
        }
        info!(published, "controller host stopped");
        Ok(published)
    }

    /// Samples the plugin's current mode and publishes it. Returns true when
    /// the publisher accepted the message.
    fn publish_status(&mut self) -> bool {
        let Some(plugin) = self.plugin.as_ref() else {
            return false;
        };
        let mode = plugin.current_mode();

        let now = self.clock.now();
        let stamp = match self.last_stamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);

        trace!(mode = %mode, packed = mode.pack(), "controller status tick");
        match self.publisher.publish(StatusMessage::new(stamp, mode)) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    topic = self.publisher.topic(),
                    "failed to publish controller status"
                );
                false
            }
        }
    }

    fn transition(&mut self, next: HostState) {
        debug!(from = %self.state, to = %next, "controller host state change");
        self.state = next;
    }
}

/// Resolves the manifest file to read the plugin's modes from.
///
/// A non-empty `plugin_available_modes_config_file` always wins: a directory
/// means its `plugin.toml`, any other path is the manifest file itself.
/// Otherwise the loader is asked for the manifest path of `name`.
pub fn resolve_manifest_path(
    config: &ControllerConfig,
    loader: &dyn PluginLoader,
    name: &str,
) -> Result<PathBuf, AerohostError> {
    match config.manifest_override() {
        Some(path) => {
            debug!(path = %path.display(), "using explicit manifest location");
            Ok(manifest_file_of(path))
        }
        None => loader.manifest_path_of(name),
    }
}

fn manifest_file_of(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Converts a publication frequency in Hz into a timer period.
pub fn status_period(freq_hz: f64) -> Result<Duration, AerohostError> {
    if !freq_hz.is_finite() || freq_hz <= 0.0 {
        return Err(AerohostError::Configuration(format!(
            "controller.publish_info_freq must be a positive number, got {freq_hz}"
        )));
    }
    Duration::try_from_secs_f64(1.0 / freq_hz)
        .ok()
        .filter(|period| !period.is_zero())
        .ok_or_else(|| {
            AerohostError::Configuration(format!(
                "controller.publish_info_freq {freq_hz} Hz gives no usable period"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerohost_core::SystemClock;
    use aerohost_test_utils::{ManifestFixture, RecordingPublisher, StubLoader};
    use tracing_test::traced_test;

    #[test]
    fn period_follows_frequency() {
        assert_eq!(status_period(10.0).unwrap(), Duration::from_millis(100));
        assert_eq!(status_period(0.5).unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn unusable_frequencies_are_rejected() {
        for freq in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300, 1e-300] {
            assert!(
                matches!(status_period(freq), Err(AerohostError::Configuration(_))),
                "{freq} should be rejected"
            );
        }
    }

    #[test]
    fn state_names_are_snake_case() {
        assert_eq!(HostState::ModeConfiguring.to_string(), "mode_configuring");
        assert_eq!(HostState::Failed.to_string(), "failed");
    }

    #[test]
    fn override_directory_means_its_plugin_toml() {
        let fixture = ManifestFixture::new(None, None);
        assert_eq!(manifest_file_of(fixture.dir()), fixture.manifest_path());
    }

    #[test]
    fn override_file_is_used_as_is() {
        let fixture = ManifestFixture::new(None, None);
        let named = fixture.dir().join("drone0_modes.toml");
        std::fs::write(&named, "[export]\n").unwrap();
        assert_eq!(manifest_file_of(&named), named);

        let missing = fixture.dir().join("not_there.toml");
        assert_eq!(manifest_file_of(&missing), missing);
    }

    #[test]
    #[traced_test]
    fn fatal_startup_is_logged_with_context() {
        let loader = StubLoader::empty("/nonexistent/plugin.toml");
        let config = ControllerConfig {
            plugin_name: Some("pkg::Missing".to_string()),
            ..ControllerConfig::default()
        };
        let mut host =
            ControllerHost::new(config, Box::new(RecordingPublisher::new()), Arc::new(SystemClock));

        assert!(host.start(&loader).is_err());
        assert!(logs_contain("FATAL: controller host startup failed"));
        assert!(logs_contain("pkg::Missing"));
        assert!(logs_contain("during=plugin_loading"));
    }
}
