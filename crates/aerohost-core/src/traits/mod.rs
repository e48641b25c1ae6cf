// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams between the host and its collaborators.
//!
//! The host only ever talks to a plugin through [`ControllerPlugin`], to the
//! plugin registry through [`PluginLoader`], to the transport through
//! [`StatusPublisher`], and to wall time through [`Clock`].

pub mod clock;
pub mod controller;
pub mod loader;
pub mod publisher;

pub use clock::{Clock, SystemClock};
pub use controller::ControllerPlugin;
pub use loader::PluginLoader;
pub use publisher::StatusPublisher;
