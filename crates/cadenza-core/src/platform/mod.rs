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

//! Contracts the core needs from its host environment.
//!
//! The core asks for exactly two things: a monotonic clock for timestamp
//! deltas, and a frame pump that runs a tick once per frame until stopped.
//! Hosts lacking a frame-callback facility plug in [`NullFramePump`] and
//! everything above degrades to a silent no-op instead of failing.

pub mod clock;
pub mod pump;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use pump::{FrameFn, FramePump, NullFramePump};
