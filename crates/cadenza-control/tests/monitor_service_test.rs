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

//! End-to-end tests for the monitor service running over a real pump.

use cadenza_control::PerformanceMonitor;
use cadenza_core::platform::MonotonicClock;
use cadenza_core::{PerformanceThresholds, Tier};
use cadenza_runtime::ThreadFramePump;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn pumped_monitor(thresholds: PerformanceThresholds) -> PerformanceMonitor {
    let clock = Arc::new(MonotonicClock::new());
    let pump = ThreadFramePump::new(clock);
    PerformanceMonitor::with_thresholds(Box::new(pump), thresholds)
}

#[test]
fn test_pumped_monitor_produces_metrics() {
    // Short windows so the test observes several closes quickly.
    let monitor = pumped_monitor(PerformanceThresholds {
        fps_sample_window_ms: 50.0,
        ..Default::default()
    });
    monitor.start();

    thread::sleep(Duration::from_millis(400));
    monitor.stop();

    let metrics = monitor.metrics();
    assert!(
        metrics.current > 0.0,
        "expected at least one closed window, metrics: {metrics:?}"
    );
    assert!(metrics.last_update_ms > 0.0);
}

#[test]
fn test_healthy_pump_keeps_tier_high() {
    let monitor = pumped_monitor(PerformanceThresholds {
        fps_sample_window_ms: 50.0,
        // A 60 Hz pump on a loaded CI machine can dip; accept anything
        // above half the nominal rate as "high" for this smoke test.
        high_tier_min_fps: 30.0,
        medium_tier_min_fps: 10.0,
        low_tier_min_fps: 5.0,
        ..Default::default()
    });
    let events = monitor.subscribe();
    monitor.start();

    thread::sleep(Duration::from_millis(400));
    monitor.stop();

    assert_eq!(monitor.current_tier(), Tier::High);
    assert!(
        events.try_recv().is_err(),
        "no tier change expected at a healthy frame rate"
    );
}

#[test]
fn test_stop_start_cycle_keeps_sampling() {
    let monitor = pumped_monitor(PerformanceThresholds {
        fps_sample_window_ms: 50.0,
        ..Default::default()
    });

    monitor.start();
    thread::sleep(Duration::from_millis(150));
    monitor.stop();
    let first = monitor.metrics().last_update_ms;

    monitor.start();
    thread::sleep(Duration::from_millis(150));
    monitor.stop();
    let second = monitor.metrics().last_update_ms;

    assert!(
        second > first,
        "restart must keep producing windows ({first} -> {second})"
    );
}
