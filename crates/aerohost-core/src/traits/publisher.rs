// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status transport seam.

use crate::error::AerohostError;
use crate::types::StatusMessage;

/// Sends status messages to whoever listens on the status topic.
///
/// Called from the periodic tick, so implementations must not block.
pub trait StatusPublisher: Send {
    /// Name of the topic messages are published on.
    fn topic(&self) -> &str;

    fn publish(&self, message: StatusMessage) -> Result<(), AerohostError>;
}
