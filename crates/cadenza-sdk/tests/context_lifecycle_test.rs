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

//! Lifecycle tests for a context running over real thread pumps.

use cadenza_sdk::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_context_ticks_registered_callbacks() {
    let context = AnimationContext::new();
    context.start();

    // Asserting inside a scheduler callback would be swallowed by the
    // panic isolation; record and check afterwards instead.
    let deltas = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&deltas);
    let id = context.scheduler().add(move |delta_ms, _timestamp_ms| {
        recorder.lock().unwrap().push(delta_ms);
    });
    assert!(context.scheduler().is_running());

    thread::sleep(Duration::from_millis(200));

    assert!(context.scheduler().remove(id));
    assert!(!context.scheduler().is_running());

    let recorded = deltas.lock().unwrap().clone();
    assert!(
        !recorded.is_empty(),
        "expected ticks from the shared loop, saw none"
    );
    for delta_ms in recorded {
        assert!((0.0..=100.0).contains(&delta_ms), "delta out of range: {delta_ms}");
    }
    context.shutdown();
}

#[test]
fn test_pause_freezes_all_registered_animations() {
    let context = AnimationContext::new();

    let ticks = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&ticks);
    context.scheduler().add(move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    thread::sleep(Duration::from_millis(100));
    // pause() joins the pump worker, so no tick is in flight past here.
    context.scheduler().pause();
    let frozen_at = ticks.load(Ordering::Relaxed);

    thread::sleep(Duration::from_millis(100));
    assert_eq!(
        ticks.load(Ordering::Relaxed),
        frozen_at,
        "no ticks may arrive while paused"
    );

    context.scheduler().resume();
    thread::sleep(Duration::from_millis(100));
    assert!(
        ticks.load(Ordering::Relaxed) > frozen_at,
        "ticking must continue after resume"
    );

    context.shutdown();
}

#[test]
fn test_monitor_and_selector_work_through_the_context() {
    let context = AnimationContext::with_thresholds(PerformanceThresholds {
        fps_sample_window_ms: 50.0,
        ..Default::default()
    });
    context.start();

    thread::sleep(Duration::from_millis(300));

    let metrics = context.monitor().metrics();
    assert!(metrics.current > 0.0, "metrics: {metrics:?}");

    let selection = context.select(AnimationGroup::Card);
    assert!(selector::is_suitable_for_tier(
        AnimationGroup::Card,
        selection.variant,
        context.monitor().current_tier()
    ));

    context.shutdown();
    assert!(!context.monitor().is_running());
}
