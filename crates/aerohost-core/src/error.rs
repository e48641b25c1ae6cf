// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Aerohost controller host.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type shared by the codec, the manifest reader, the
/// plugin loader, and the controller host.
///
/// Every variant raised during startup is fatal: the host never retries and
/// never enters a partially configured running state.
#[derive(Debug, Error)]
pub enum AerohostError {
    /// Missing or malformed required configuration (e.g. `plugin_name`).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The loader could not instantiate the named plugin.
    #[error("failed to load plugin `{name}`: {message}")]
    PluginLoad { name: String, message: String },

    /// The manifest directory or file could not be opened or parsed.
    #[error("manifest unreadable at {}: {reason}", path.display())]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// The manifest does not export the requested tag.
    #[error("manifest at {} has no `{tag}` export", path.display())]
    ManifestTagMissing { path: PathBuf, tag: String },

    /// A textual mode descriptor does not follow `control.yaw.frame`.
    #[error("malformed control mode descriptor `{token}`: {reason}")]
    MalformedModeDescriptor { token: String, reason: String },

    /// A packed mode value has no valid sub-field mapping.
    #[error("invalid control mode encoding {bits:#010b}")]
    InvalidModeEncoding { bits: u32 },

    /// The status transport rejected a message.
    #[error("status publish failed: {0}")]
    Publish(String),
}

impl AerohostError {
    /// Returns true for the manifest lookup family of errors.
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            AerohostError::ManifestUnreadable { .. } | AerohostError::ManifestTagMissing { .. }
        )
    }

    /// Returns true for codec failures.
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            AerohostError::MalformedModeDescriptor { .. }
                | AerohostError::InvalidModeEncoding { .. }
        )
    }
}
