// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary manifest directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temp directory holding a `plugin.toml`. Removed on drop.
#[derive(Debug)]
pub struct ManifestFixture {
    dir: TempDir,
}

impl ManifestFixture {
    /// Writes a manifest exporting the given tags. `None` omits the tag.
    pub fn new(input_modes: Option<&str>, output_modes: Option<&str>) -> Self {
        let mut content = String::from(
            "[plugin]\nname = \"fixture_pkg::Fixture\"\nversion = \"0.1.0\"\n\n[export]\n",
        );
        if let Some(modes) = input_modes {
            content.push_str(&format!("input_control_modes = {modes:?}\n"));
        }
        if let Some(modes) = output_modes {
            content.push_str(&format!("output_control_modes = {modes:?}\n"));
        }
        Self::with_content(&content)
    }

    /// Writes `content` verbatim as the manifest.
    pub fn with_content(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("create manifest fixture dir");
        std::fs::write(dir.path().join("plugin.toml"), content).expect("write manifest fixture");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("plugin.toml")
    }
}
