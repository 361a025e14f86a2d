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

//! # Cadenza Core
//!
//! Foundational crate containing the tier model, the animation group
//! catalog, threshold configuration, and the platform contracts that the
//! runtime and control crates are built against.

#![warn(missing_docs)]

pub mod config;
pub mod event;
pub mod group;
pub mod metrics;
pub mod platform;
pub mod tier;

pub use config::{ConfigError, PerformanceThresholds, ThresholdsPatch};
pub use event::{Broadcast, Severity, Subscription, TierEvent};
pub use group::{AnimationGroup, AnimationVariant, GroupSelection, Quality};
pub use metrics::FpsMetrics;
pub use tier::Tier;
