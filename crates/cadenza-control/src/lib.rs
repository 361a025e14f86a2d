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

//! # Cadenza Control
//!
//! Continuous performance classification and tier-appropriate animation
//! selection. The [`PerformanceMonitor`] samples the measured frame rate,
//! confirms tier transitions with hysteresis, and broadcasts them; the
//! [`selector`] module maps any (group, tier) pair to a concrete animation
//! variant and its cost profile.

#![warn(missing_docs)]

pub mod analysis;
pub mod sampling;
pub mod selector;
pub mod service;

pub use analysis::TierEngine;
pub use service::PerformanceMonitor;
