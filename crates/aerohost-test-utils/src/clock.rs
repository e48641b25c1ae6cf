// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic clock for timestamp assertions.

use std::sync::atomic::{AtomicI64, Ordering};

use aerohost_core::Clock;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Starts at a fixed instant and moves forward by `step` on every read.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step_ms: i64,
    reads: AtomicI64,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            step_ms: step.num_milliseconds(),
            reads: AtomicI64::new(0),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::milliseconds(n * self.step_ms)
    }
}
