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

//! Thread-backed frame pump.

use cadenza_core::platform::{Clock, FrameFn, FramePump};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Frame pump driven by a dedicated worker thread.
///
/// Delivers one tick per nominal frame interval (60 Hz unless configured
/// otherwise) with the owning clock's current timestamp, until the tick
/// asks to stop or `stop` is called. Each pump owns its own thread, so a
/// scheduler pump and a monitor pump run as independent chains.
pub struct ThreadFramePump {
    clock: Arc<dyn Clock>,
    interval: Duration,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ThreadFramePump {
    /// Nominal 60 Hz frame interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(16_667);

    /// Creates a pump ticking at the default 60 Hz cadence.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_interval(clock, Self::DEFAULT_INTERVAL)
    }

    /// Creates a pump ticking at a custom cadence.
    pub fn with_interval(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl FramePump for ThreadFramePump {
    fn start(&mut self, mut on_frame: FrameFn) -> bool {
        if self.running.load(Ordering::SeqCst) {
            return true;
        }
        // Reap a worker that stopped itself before spawning a new one.
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let clock = Arc::clone(&self.clock);
        let interval = self.interval;

        let handle = thread::spawn(move || {
            log::debug!("ThreadFramePump: worker started.");
            while running.load(Ordering::Relaxed) {
                let frame_start = Instant::now();
                if !on_frame(clock.now_ms()) {
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                let elapsed = frame_start.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
            log::debug!("ThreadFramePump: worker stopped.");
        });
        self.handle = Some(handle);
        true
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            // A tick may itself stop the pump (e.g. the last callback was
            // removed mid-frame); joining the worker from its own thread
            // would never return, so the finishing worker is detached.
            if handle.thread().id() == thread::current().id() {
                return;
            }
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadFramePump {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::platform::MonotonicClock;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn test_pump_delivers_ticks_until_stopped() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let mut pump = ThreadFramePump::with_interval(
            Arc::new(MonotonicClock::new()),
            Duration::from_millis(1),
        );

        assert!(pump.start(Box::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            true
        })));
        thread::sleep(Duration::from_millis(50));
        pump.stop();

        let seen = ticks.load(Ordering::Relaxed);
        assert!(seen > 0, "expected at least one tick, saw {seen}");

        // No further ticks after stop.
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::Relaxed), seen);
    }

    #[test]
    fn test_tick_returning_false_stops_the_chain() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let mut pump = ThreadFramePump::with_interval(
            Arc::new(MonotonicClock::new()),
            Duration::from_millis(1),
        );

        pump.start(Box::new(move |_| counter.fetch_add(1, Ordering::Relaxed) < 2));
        thread::sleep(Duration::from_millis(50));

        assert_eq!(ticks.load(Ordering::Relaxed), 3);
        // The worker exits on its own; stop() just reaps it.
        pump.stop();
    }

    #[test]
    fn test_restart_after_self_stop() {
        let mut pump = ThreadFramePump::with_interval(
            Arc::new(MonotonicClock::new()),
            Duration::from_millis(1),
        );

        pump.start(Box::new(|_| false));
        thread::sleep(Duration::from_millis(20));

        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        assert!(pump.start(Box::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            true
        })));
        thread::sleep(Duration::from_millis(20));
        pump.stop();

        assert!(ticks.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut pump = ThreadFramePump::new(Arc::new(MonotonicClock::new()));
        pump.stop();
        pump.stop();
    }
}
