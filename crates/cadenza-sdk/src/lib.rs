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

//! # Cadenza SDK
//!
//! The public-facing surface for embedding the animation-performance core.
//! A host constructs one [`AnimationContext`] at startup and passes it by
//! reference to every consumer; the context owns the shared frame
//! scheduler and the performance monitor, and there are no hidden globals.

#![warn(missing_docs)]

use cadenza_control::{selector, PerformanceMonitor};
use cadenza_core::platform::{Clock, MonotonicClock, NullFramePump};
use cadenza_core::{AnimationGroup, GroupSelection, PerformanceThresholds};
use cadenza_runtime::{FrameScheduler, ThreadFramePump};
use std::sync::Arc;

/// Commonly used types for hosts embedding the core.
pub mod prelude {
    pub use crate::AnimationContext;
    pub use cadenza_control::selector;
    pub use cadenza_control::PerformanceMonitor;
    pub use cadenza_core::{
        AnimationGroup, AnimationVariant, FpsMetrics, GroupSelection, PerformanceThresholds,
        Quality, Severity, ThresholdsPatch, Tier, TierEvent,
    };
    pub use cadenza_runtime::{CallbackId, FrameScheduler};
}

/// Owning context for the animation-performance subsystem.
///
/// Replaces the usual pair of `getInstance()` singletons with an explicit
/// object whose lifetime the application controls: created at startup,
/// dropped (or [`shutdown`](Self::shutdown)) at teardown. Both the
/// scheduler and the monitor drive themselves on independent frame-pump
/// chains over a shared clock.
pub struct AnimationContext {
    scheduler: FrameScheduler,
    monitor: PerformanceMonitor,
}

impl AnimationContext {
    /// Builds a context over thread-backed frame pumps at the nominal
    /// 60 Hz cadence, with default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(PerformanceThresholds::default())
    }

    /// Builds a context over thread-backed frame pumps with caller
    /// thresholds.
    pub fn with_thresholds(thresholds: PerformanceThresholds) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
        let scheduler = FrameScheduler::new(Box::new(ThreadFramePump::new(Arc::clone(&clock))));
        let monitor =
            PerformanceMonitor::with_thresholds(Box::new(ThreadFramePump::new(clock)), thresholds);
        log::info!("AnimationContext: constructed.");
        Self { scheduler, monitor }
    }

    /// Builds a context for hosts without any frame-callback facility.
    ///
    /// Everything constructs and tears down normally; starting the monitor
    /// or registering callbacks is a silent no-op.
    pub fn headless() -> Self {
        Self {
            scheduler: FrameScheduler::new(Box::new(NullFramePump)),
            monitor: PerformanceMonitor::new(Box::new(NullFramePump)),
        }
    }

    /// Starts performance monitoring. Called once by the application root.
    pub fn start(&self) {
        self.monitor.start();
    }

    /// The shared per-frame tick source.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// The performance monitor.
    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// Selects the variant a group should run right now, at the monitor's
    /// currently confirmed tier.
    pub fn select(&self, group: AnimationGroup) -> GroupSelection {
        selector::select(group, self.monitor.current_tier())
    }

    /// Tears down both components. Safe to call repeatedly; dropping the
    /// context performs the same teardown.
    pub fn shutdown(&self) {
        self.monitor.destroy();
        self.scheduler.destroy();
        log::info!("AnimationContext: shut down.");
    }
}

impl Default for AnimationContext {
    fn default() -> Self {
        Self::new()
    }
}
