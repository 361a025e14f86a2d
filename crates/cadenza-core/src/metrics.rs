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

//! Snapshot types for measured frame-rate statistics.

/// Rolling frame-rate statistics, recomputed once per sampling window.
///
/// Callers always receive an owned copy; mutating a snapshot has no effect
/// on the monitor that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FpsMetrics {
    /// FPS measured over the most recent completed window.
    pub current: f32,
    /// Mean FPS across the retained sample history.
    pub average: f32,
    /// Lowest windowed FPS in the retained sample history.
    pub min: f32,
    /// Highest windowed FPS in the retained sample history.
    pub max: f32,
    /// Total dropped frames since the monitor started.
    pub dropped_frames: u64,
    /// Dropped frames as a fraction of all counted frames.
    pub drop_rate: f32,
    /// Timestamp (ms) of the window close that produced this snapshot.
    pub last_update_ms: f64,
}

impl Default for FpsMetrics {
    fn default() -> Self {
        Self {
            current: 0.0,
            average: 0.0,
            min: 0.0,
            max: 0.0,
            dropped_frames: 0,
            drop_rate: 0.0,
            last_update_ms: 0.0,
        }
    }
}
