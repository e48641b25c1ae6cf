// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Aerohost configuration system.

use aerohost_config::diagnostic::ConfigError;
use aerohost_config::model::AerohostConfig;
use aerohost_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_str,
};
use figment::Jail;

/// Every documented key deserializes into the model.
#[test]
fn full_toml_deserializes() {
    let toml = r#"
[host]
log_level = "debug"
status_topic = "drone0/controller/info"
status_buffer = 16

[controller]
publish_cmd_freq = 50.0
publish_info_freq = 5.0
plugin_name = "controller_plugin_pid::PidController"
use_bypass = false
plugin_config_file = "/opt/pid/gains.yaml"
plugin_available_modes_config_file = "/opt/pid/share"

[plugins]
manifest_root = "/opt/aerohost/plugins"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.host.log_level, "debug");
    assert_eq!(config.host.status_topic, "drone0/controller/info");
    assert_eq!(config.host.status_buffer, 16);
    assert_eq!(config.controller.publish_cmd_freq, 50.0);
    assert_eq!(config.controller.publish_info_freq, 5.0);
    assert_eq!(
        config.controller.plugin_name().unwrap(),
        "controller_plugin_pid::PidController"
    );
    assert!(!config.controller.use_bypass);
    assert_eq!(
        config.controller.plugin_config_file.as_deref(),
        Some(std::path::Path::new("/opt/pid/gains.yaml"))
    );
    assert_eq!(
        config.controller.manifest_override(),
        Some(std::path::Path::new("/opt/pid/share"))
    );
    assert_eq!(
        config.plugins.manifest_root,
        std::path::PathBuf::from("/opt/aerohost/plugins")
    );
}

/// Missing sections fall back to the documented defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.controller.publish_cmd_freq, 100.0);
    assert_eq!(config.controller.publish_info_freq, 10.0);
    assert!(config.controller.plugin_name.is_none());
    assert!(config.controller.use_bypass);
    assert!(config.controller.plugin_config_file.is_none());
    assert!(config.controller.manifest_override().is_none());
    assert_eq!(config.host.log_level, "info");
    assert_eq!(config.host.status_topic, "controller/info");
}

/// Defaults alone are not a runnable configuration: the plugin is required.
#[test]
fn validation_requires_plugin_name() {
    let errors = load_and_validate_str("[controller]\npublish_info_freq = 20.0\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "controller.plugin_name")));
}

/// A typo is reported as an unknown key with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = "[controller]\nplugin_nmae = \"a::B\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should report unknown key");
    assert_eq!(unknown.0, "plugin_nmae");
    assert_eq!(unknown.1.as_deref(), Some("plugin_name"));
}

/// A wrongly typed value is reported with its dotted key.
#[test]
fn invalid_type_reports_key() {
    let toml = "[controller]\npublish_info_freq = \"fast\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidType { key, .. } if key == "controller.publish_info_freq"
    )));
}

/// Environment variables override the local file, section by section.
#[test]
fn env_vars_override_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "aerohost.toml",
            r#"
[controller]
plugin_name = "from_file::Controller"
publish_info_freq = 2.0
"#,
        )?;
        jail.set_env("AEROHOST_CONTROLLER_PLUGIN_NAME", "from_env::Controller");
        jail.set_env("AEROHOST_HOST_LOG_LEVEL", "warn");

        let config: AerohostConfig = load_config()?;
        assert_eq!(
            config.controller.plugin_name.as_deref(),
            Some("from_env::Controller")
        );
        assert_eq!(config.controller.publish_info_freq, 2.0);
        assert_eq!(config.host.log_level, "warn");
        Ok(())
    });
}

/// An explicit file path is loaded on its own and validated.
#[test]
fn explicit_path_is_loaded_and_validated() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("host.toml");
        std::fs::write(
            &path,
            "[controller]\nplugin_name = \"controller_plugin_passthrough::Passthrough\"\n",
        )
        .expect("write config");

        let config = load_and_validate_path(&path).expect("file should validate");
        assert_eq!(
            config.controller.plugin_name().unwrap(),
            "controller_plugin_passthrough::Passthrough"
        );
        Ok(())
    });
}

/// Missing files are skipped silently, leaving validation to flag the gap.
#[test]
fn missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let errors = load_and_validate_path(std::path::Path::new("/nonexistent/aerohost.toml"))
            .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { .. })));
        Ok(())
    });
}

/// Tools that skip validation still get defaults and overrides.
#[test]
fn unvalidated_load_accepts_missing_plugin_name() {
    Jail::expect_with(|jail| {
        jail.create_file("aerohost.toml", "[plugins]\nmanifest_root = \"/srv/plugins\"\n")?;

        let config = aerohost_config::load_unvalidated(None).expect("config should load");
        assert!(config.controller.plugin_name.is_none());
        assert_eq!(
            config.plugins.manifest_root,
            std::path::PathBuf::from("/srv/plugins")
        );
        Ok(())
    });
}
