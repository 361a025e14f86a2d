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

// Cadenza sandbox
// Wires a context, registers a couple of animated features on the shared
// frame loop, and reports what the selector hands out per group.

use anyhow::Result;
use cadenza_sdk::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let context = AnimationContext::new();
    context.monitor().set_viewport(1920, 1080);
    context.start();

    // Two "animated features" sharing the one frame loop.
    let spinner_frames = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&spinner_frames);
    let spinner = context.scheduler().add(move |delta_ms, timestamp_ms| {
        counter.fetch_add(1, Ordering::Relaxed);
        log::trace!("spinner: delta={delta_ms:.2}ms at t={timestamp_ms:.1}ms");
    });
    let pulse = context.scheduler().add(|delta_ms, _| {
        log::trace!("pulse: delta={delta_ms:.2}ms");
    });

    let events = context.monitor().subscribe();
    log::info!("running for two seconds...");
    thread::sleep(Duration::from_secs(2));

    for event in events.try_iter() {
        log::info!(
            "tier change: {} -> {} at {:.1} fps ({:?})",
            event.previous_tier,
            event.recommended_tier,
            event.fps,
            event.severity
        );
    }

    let metrics = context.monitor().metrics();
    log::info!(
        "tier={} fps: current={:.1} average={:.1} min={:.1} max={:.1} dropped={}",
        context.monitor().current_tier(),
        metrics.current,
        metrics.average,
        metrics.min,
        metrics.max,
        metrics.dropped_frames
    );
    log::info!(
        "spinner ran {} frames on the shared loop",
        spinner_frames.load(Ordering::Relaxed)
    );

    for group in AnimationGroup::ALL {
        let selection = context.select(group);
        log::info!(
            "{group}: {} ({}, complexity {}, gpu={})",
            selection.variant,
            selection.quality,
            selection.complexity,
            selection.use_gpu
        );
    }

    context.scheduler().remove(spinner);
    context.scheduler().remove(pulse);
    context.shutdown();
    Ok(())
}
