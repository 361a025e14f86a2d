// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Monotonic time sources.

use std::sync::Mutex;
use std::time::Instant;

/// A monotonic clock usable for timestamp deltas.
///
/// Timestamps are milliseconds on the clock's own timeline; only
/// differences between them are meaningful.
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed on this clock's timeline.
    fn now_ms(&self) -> f64;
}

/// Production clock anchored to [`std::time::Instant`].
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose timeline starts at the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced clock for deterministic tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Mutex<f64>,
}

impl ManualClock {
    /// Creates a manual clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set(&self, ms: f64) {
        *self.now_ms.lock().unwrap() = ms;
    }

    /// Advances the clock by the given number of milliseconds.
    pub fn advance(&self, ms: f64) {
        *self.now_ms.lock().unwrap() += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        *self.now_ms.lock().unwrap()
    }
}
