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

//! The frame-callback pump contract.

/// Per-frame tick delivered by a pump.
///
/// Receives the current timestamp in milliseconds and returns whether the
/// pump should keep ticking; returning `false` cancels the chain before
/// the next frame fires.
pub type FrameFn = Box<dyn FnMut(f64) -> bool + Send>;

/// A "run this tick once per frame until stopped" primitive.
///
/// This is the core's only scheduling dependency on the host. The
/// production implementation lives in `cadenza-runtime`; hosts without any
/// frame-callback facility use [`NullFramePump`], whose `start` reports
/// failure so components above it can degrade to a no-op instead of
/// erroring.
pub trait FramePump: Send {
    /// Whether the host can deliver frame callbacks at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Starts delivering ticks to `on_frame`.
    ///
    /// Returns `false` when the pump cannot run in this host. Starting an
    /// already-running pump is a no-op that returns `true`.
    fn start(&mut self, on_frame: FrameFn) -> bool;

    /// Stops delivering ticks. Idempotent.
    fn stop(&mut self);
}

/// Pump for hosts without a frame-callback primitive.
///
/// Never ticks; `start` reports failure and `stop` does nothing, so a
/// component built over it constructs and tears down normally but stays
/// idle.
#[derive(Debug, Default)]
pub struct NullFramePump;

impl FramePump for NullFramePump {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _on_frame: FrameFn) -> bool {
        false
    }

    fn stop(&mut self) {}
}
