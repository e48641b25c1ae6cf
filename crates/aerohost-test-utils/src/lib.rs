// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Aerohost integration tests.
//!
//! # Components
//!
//! - [`RecordingController`] - controller double that records what the host installs
//! - [`RecordingPublisher`] - status publisher that captures every message
//! - [`SteppingClock`] - deterministic clock advancing on every read
//! - [`StubLoader`] - plugin loader with a fixed plugin and manifest path
//! - [`ManifestFixture`] - temporary manifest directory

pub mod clock;
pub mod fixture;
pub mod loader;
pub mod mock_controller;
pub mod publisher;

pub use clock::SteppingClock;
pub use fixture::ManifestFixture;
pub use loader::StubLoader;
pub use mock_controller::{ControllerRecord, RecordingController};
pub use publisher::RecordingPublisher;
