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

//! Shared per-frame callback scheduler.
//!
//! One scheduler, one underlying frame loop. Every animated feature
//! registers a callback here instead of running its own loop; the loop is
//! armed exactly while the registry is non-empty.

use cadenza_core::platform::FramePump;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle identifying a registered callback.
///
/// Ids come from a process-monotonic counter and are never reused, so a
/// stale handle can never accidentally remove a later registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    /// The raw id value, mainly for logging.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A registered per-frame callback: receives `(delta_ms, timestamp_ms)`.
pub type FrameCallback = Box<dyn FnMut(f64, f64) + Send>;

/// Policy invoked when a registered callback panics.
///
/// Receives the offending callback's id and the panic payload. The default
/// policy logs at error level; hosts wanting telemetry or stricter
/// containment supply their own via [`FrameScheduler::with_panic_hook`].
pub type PanicHook = Arc<dyn Fn(CallbackId, &(dyn Any + Send)) + Send + Sync>;

/// Largest delta ever reported to callbacks, in milliseconds. Defends
/// against huge gaps after the process was suspended.
const MAX_DELTA_MS: f64 = 100.0;

struct Entry {
    id: CallbackId,
    callback: Arc<Mutex<FrameCallback>>,
}

struct Registry {
    entries: Vec<Entry>,
    last_timestamp_ms: Option<f64>,
}

struct Shared {
    registry: Mutex<Registry>,
    /// Whether the frame loop should be delivering ticks right now.
    armed: AtomicBool,
    panic_hook: PanicHook,
}

impl Shared {
    /// Runs one tick against a snapshot of the registry.
    ///
    /// Returns whether the frame chain should stay armed afterwards.
    fn run_frame(&self, timestamp_ms: f64) -> bool {
        let delta_ms;
        let snapshot: Vec<(CallbackId, Arc<Mutex<FrameCallback>>)> = {
            let mut registry = self.registry.lock().unwrap();
            delta_ms = match registry.last_timestamp_ms {
                Some(last) => (timestamp_ms - last).clamp(0.0, MAX_DELTA_MS),
                None => 0.0,
            };
            registry.last_timestamp_ms = Some(timestamp_ms);
            registry
                .entries
                .iter()
                .map(|entry| (entry.id, Arc::clone(&entry.callback)))
                .collect()
        };
        // The registry lock is released before any callback runs, so
        // callbacks may freely add/remove registrations: additions take
        // effect next tick, removals after the in-flight snapshot.

        for (id, callback) in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                // A previous panic poisons the entry's own lock; clear it
                // so the callback still runs on later ticks.
                let mut cb = match callback.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                cb(delta_ms, timestamp_ms);
            }));
            if let Err(payload) = outcome {
                (self.panic_hook)(id, payload.as_ref());
            }
        }

        let keep = self.armed.load(Ordering::SeqCst)
            && !self.registry.lock().unwrap().entries.is_empty();
        if !keep {
            self.armed.store(false, Ordering::SeqCst);
        }
        keep
    }
}

/// The shared per-frame tick source.
///
/// Owns the callback registry and the single underlying frame-callback
/// chain. Constructed once by the application root and passed by reference
/// to every consumer; there is no hidden global instance.
pub struct FrameScheduler {
    shared: Arc<Shared>,
    pump: Mutex<Box<dyn FramePump>>,
    next_id: AtomicU64,
    paused: AtomicBool,
}

impl FrameScheduler {
    /// Creates a scheduler over the given frame pump.
    pub fn new(pump: Box<dyn FramePump>) -> Self {
        Self::with_panic_hook(pump, default_panic_hook())
    }

    /// Creates a scheduler with a caller-supplied callback-failure policy.
    pub fn with_panic_hook(pump: Box<dyn FramePump>, panic_hook: PanicHook) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry {
                    entries: Vec::new(),
                    last_timestamp_ms: None,
                }),
                armed: AtomicBool::new(false),
                panic_hook,
            }),
            pump: Mutex::new(pump),
            next_id: AtomicU64::new(0),
            paused: AtomicBool::new(false),
        }
    }

    /// Registers a per-frame callback and returns its handle.
    ///
    /// The first registration arms the underlying frame loop. Callbacks
    /// run in registration order with `(delta_ms, timestamp_ms)`; a
    /// callback registered during a tick starts running on the next tick.
    pub fn add(&self, callback: impl FnMut(f64, f64) + Send + 'static) -> CallbackId {
        let id = CallbackId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let first = {
            let mut registry = self.shared.registry.lock().unwrap();
            registry.entries.push(Entry {
                id,
                callback: Arc::new(Mutex::new(Box::new(callback))),
            });
            registry.entries.len() == 1
        };
        log::debug!("FrameScheduler: registered callback #{}.", id.value());
        if first && !self.paused.load(Ordering::SeqCst) {
            self.arm();
        }
        id
    }

    /// Unregisters a callback.
    ///
    /// Returns whether an entry existed; removing an unknown or
    /// already-removed id is a safe no-op returning `false`. If the
    /// callback was already captured in an in-flight tick's snapshot it
    /// may run once more before the removal takes effect. Emptying the
    /// registry stops the underlying loop.
    pub fn remove(&self, id: CallbackId) -> bool {
        let (removed, now_empty) = {
            let mut registry = self.shared.registry.lock().unwrap();
            let before = registry.entries.len();
            registry.entries.retain(|entry| entry.id != id);
            (registry.entries.len() != before, registry.entries.is_empty())
        };
        if removed {
            log::debug!("FrameScheduler: removed callback #{}.", id.value());
            if now_empty {
                self.disarm();
            }
        }
        removed
    }

    /// Freezes the frame loop without clearing the registry.
    ///
    /// Registered callbacks stay registered and resume ticking after
    /// [`resume`](Self::resume); paused time contributes no ticks, and the
    /// first post-resume delta is capped by the usual clamp.
    pub fn pause(&self) {
        if self.paused.swap(true, Ordering::SeqCst) {
            return;
        }
        log::debug!("FrameScheduler: paused.");
        self.disarm();
    }

    /// Restarts the frame loop after [`pause`](Self::pause).
    pub fn resume(&self) {
        if !self.paused.swap(false, Ordering::SeqCst) {
            return;
        }
        log::debug!("FrameScheduler: resumed.");
        if self.active_count() > 0 {
            self.arm();
        }
    }

    /// Full teardown: stops the loop and clears the registry.
    ///
    /// The scheduler remains usable afterwards; `destroy` followed by
    /// `add` behaves like a freshly constructed instance (ids keep
    /// counting up, never restarting).
    pub fn destroy(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.disarm();
        let mut registry = self.shared.registry.lock().unwrap();
        registry.entries.clear();
        registry.last_timestamp_ms = None;
        log::debug!("FrameScheduler: destroyed.");
    }

    /// Number of currently registered callbacks.
    pub fn active_count(&self) -> usize {
        self.shared.registry.lock().unwrap().entries.len()
    }

    /// Whether the underlying frame loop is armed.
    pub fn is_running(&self) -> bool {
        self.shared.armed.load(Ordering::SeqCst)
    }

    /// Drives one tick synchronously with a caller-supplied timestamp.
    ///
    /// This is the same entry the pump calls; hosts that bring their own
    /// loop (and tests) use it to tick without any pump.
    pub fn run_frame(&self, timestamp_ms: f64) {
        self.shared.run_frame(timestamp_ms);
    }

    fn arm(&self) {
        if self.shared.armed.swap(true, Ordering::SeqCst) {
            return;
        }
        let shared = Arc::clone(&self.shared);
        let started = self
            .pump
            .lock()
            .unwrap()
            .start(Box::new(move |timestamp_ms| shared.run_frame(timestamp_ms)));
        if !started {
            self.shared.armed.store(false, Ordering::SeqCst);
            log::warn!(
                "FrameScheduler: host has no frame-callback primitive; scheduler stays idle."
            );
        }
    }

    fn disarm(&self) {
        self.shared.armed.store(false, Ordering::SeqCst);
        self.pump.lock().unwrap().stop();
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn default_panic_hook() -> PanicHook {
    Arc::new(|id, payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        log::error!(
            "FrameScheduler: callback #{} panicked: {}",
            id.value(),
            message
        );
    })
}
