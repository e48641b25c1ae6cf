// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status publisher that keeps everything it is given.

use std::sync::{Arc, Mutex};

use aerohost_core::{AerohostError, StatusMessage, StatusPublisher};

/// Captures published status messages. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    messages: Arc<Mutex<Vec<StatusMessage>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<StatusMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or_default()
    }
}

impl StatusPublisher for RecordingPublisher {
    fn topic(&self) -> &str {
        "test/controller/info"
    }

    fn publish(&self, message: StatusMessage) -> Result<(), AerohostError> {
        self.messages
            .lock()
            .map_err(|_| AerohostError::Publish("recording buffer poisoned".to_string()))?
            .push(message);
        Ok(())
    }
}
