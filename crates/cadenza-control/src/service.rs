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

//! The performance monitor service.
//!
//! Wraps the deterministic [`TierEngine`] with a frame pump of its own
//! (independent of the scheduler's chain) and a broadcast channel for
//! tier-change notifications.

use crate::analysis::TierEngine;
use cadenza_core::event::Broadcast;
use cadenza_core::platform::FramePump;
use cadenza_core::{
    FpsMetrics, PerformanceThresholds, Subscription, ThresholdsPatch, Tier, TierEvent,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

struct MonitorShared {
    engine: Mutex<TierEngine>,
    events: Broadcast<TierEvent>,
}

impl MonitorShared {
    fn run_frame(&self, timestamp_ms: f64) {
        let event = self.engine.lock().unwrap().on_frame(timestamp_ms);
        // The engine lock is released before publishing so a subscriber
        // reacting synchronously can query the monitor without contention.
        if let Some(event) = event {
            self.events.publish(&event);
        }
    }
}

/// Continuously classifies sustained rendering performance into a [`Tier`]
/// and broadcasts hysteresis-confirmed transitions.
///
/// One live monitor per process is the intended discipline; the instance
/// is owned by the application root and handed around by reference rather
/// than living in a hidden global.
pub struct PerformanceMonitor {
    shared: Arc<MonitorShared>,
    pump: Mutex<Box<dyn FramePump>>,
    running: AtomicBool,
}

impl PerformanceMonitor {
    /// Creates a monitor with the default thresholds.
    pub fn new(pump: Box<dyn FramePump>) -> Self {
        Self::with_thresholds(pump, PerformanceThresholds::default())
    }

    /// Creates a monitor with caller-supplied thresholds.
    pub fn with_thresholds(pump: Box<dyn FramePump>, thresholds: PerformanceThresholds) -> Self {
        Self {
            shared: Arc::new(MonitorShared {
                engine: Mutex::new(TierEngine::new(thresholds)),
                events: Broadcast::new(),
            }),
            pump: Mutex::new(pump),
            running: AtomicBool::new(false),
        }
    }

    /// Starts sampling. Idempotent.
    ///
    /// When the host has no frame-callback primitive this logs and stays
    /// idle instead of erroring, so callers never need to special-case
    /// unsupported environments.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        // Re-anchor sampling so the idle gap since the last stop does not
        // read as a giant stalled frame.
        self.shared.engine.lock().unwrap().rebase();
        let started = {
            let mut pump = self.pump.lock().unwrap();
            if pump.is_supported() {
                let shared = Arc::clone(&self.shared);
                pump.start(Box::new(move |timestamp_ms| {
                    shared.run_frame(timestamp_ms);
                    true
                }))
            } else {
                false
            }
        };
        if started {
            log::info!("PerformanceMonitor: started.");
        } else {
            self.running.store(false, Ordering::SeqCst);
            log::warn!(
                "PerformanceMonitor: host has no frame-callback primitive; monitoring disabled."
            );
        }
    }

    /// Stops sampling. Idempotent; registrations (subscribers, thresholds,
    /// accumulated statistics) survive a stop/start cycle.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.pump.lock().unwrap().stop();
        log::info!("PerformanceMonitor: stopped.");
    }

    /// Full teardown: stops sampling and resets the engine to a fresh
    /// start (configuration survives, measurements do not).
    pub fn destroy(&self) {
        self.stop();
        self.shared.engine.lock().unwrap().reset();
    }

    /// Whether the sampling loop is currently armed.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Immutable snapshot of the most recent window statistics.
    pub fn metrics(&self) -> FpsMetrics {
        self.shared.engine.lock().unwrap().metrics()
    }

    /// The currently confirmed tier.
    pub fn current_tier(&self) -> Tier {
        self.shared.engine.lock().unwrap().tier()
    }

    /// Merges a partial threshold update into the live configuration.
    pub fn set_thresholds(&self, patch: ThresholdsPatch) {
        self.shared.engine.lock().unwrap().apply_thresholds(patch);
    }

    /// Manually pins the tier; see [`TierEngine::force_tier`].
    pub fn force_tier(&self, tier: Tier) {
        self.shared.engine.lock().unwrap().force_tier(tier);
    }

    /// Records the host's rendered surface size for the high-tier pixel
    /// budget.
    pub fn set_viewport(&self, width: u32, height: u32) {
        self.shared.engine.lock().unwrap().set_viewport(width, height);
    }

    /// Subscribes to tier-change notifications.
    pub fn subscribe(&self) -> Subscription<TierEvent> {
        self.shared.events.subscribe()
    }

    /// Drives one frame synchronously with a caller-supplied timestamp.
    ///
    /// The same entry the pump calls; hosts that bring their own loop (and
    /// tests) use it to feed synthetic timestamp sequences.
    pub fn run_frame(&self, timestamp_ms: f64) {
        self.shared.run_frame(timestamp_ms);
    }
}

impl Drop for PerformanceMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
