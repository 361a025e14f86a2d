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

//! Threshold configuration for the performance monitor.

use crate::event::Severity;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Tuning knobs for tier classification and sampling cadence.
///
/// Supplied at monitor construction and mutable thereafter via
/// [`ThresholdsPatch`]. Values are accepted as-is; the monitor does not
/// second-guess a host that configures nonsensical bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceThresholds {
    /// Minimum sustained FPS for the `high` tier.
    pub high_tier_min_fps: f32,
    /// Minimum sustained FPS for the `medium` tier.
    pub medium_tier_min_fps: f32,
    /// Minimum sustained FPS for the `low` tier; below this is `minimal`.
    pub low_tier_min_fps: f32,
    /// Viewports above this pixel count never auto-select the `high` tier.
    pub high_tier_max_pixels: u64,
    /// Length of one FPS sampling window, in milliseconds.
    pub fps_sample_window_ms: f64,
    /// Consecutive unfavorable windows required before a downgrade fires.
    pub degradation_trigger_count: u32,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            high_tier_min_fps: 55.0,
            medium_tier_min_fps: 30.0,
            low_tier_min_fps: 15.0,
            high_tier_max_pixels: 1920 * 1080,
            fps_sample_window_ms: 1000.0,
            degradation_trigger_count: 3,
        }
    }
}

impl PerformanceThresholds {
    /// Classifies a measured FPS value against the threshold ladder.
    pub fn classify(&self, fps: f32) -> Tier {
        if fps >= self.high_tier_min_fps {
            Tier::High
        } else if fps >= self.medium_tier_min_fps {
            Tier::Medium
        } else if fps >= self.low_tier_min_fps {
            Tier::Low
        } else {
            Tier::Minimal
        }
    }

    /// Derives a notification severity from a measured FPS value.
    pub fn severity(&self, fps: f32) -> Severity {
        if fps < self.low_tier_min_fps {
            Severity::Severe
        } else if fps < self.medium_tier_min_fps {
            Severity::Moderate
        } else {
            Severity::Mild
        }
    }

    /// Merges a partial patch into this configuration. Unset fields keep
    /// their current values.
    pub fn apply(&mut self, patch: ThresholdsPatch) {
        if let Some(v) = patch.high_tier_min_fps {
            self.high_tier_min_fps = v;
        }
        if let Some(v) = patch.medium_tier_min_fps {
            self.medium_tier_min_fps = v;
        }
        if let Some(v) = patch.low_tier_min_fps {
            self.low_tier_min_fps = v;
        }
        if let Some(v) = patch.high_tier_max_pixels {
            self.high_tier_max_pixels = v;
        }
        if let Some(v) = patch.fps_sample_window_ms {
            self.fps_sample_window_ms = v;
        }
        if let Some(v) = patch.degradation_trigger_count {
            self.degradation_trigger_count = v;
        }
    }

    /// Loads a full threshold configuration from a JSON string.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a full threshold configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_json(&content)
    }
}

/// Partial update for [`PerformanceThresholds`]; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsPatch {
    /// See [`PerformanceThresholds::high_tier_min_fps`].
    pub high_tier_min_fps: Option<f32>,
    /// See [`PerformanceThresholds::medium_tier_min_fps`].
    pub medium_tier_min_fps: Option<f32>,
    /// See [`PerformanceThresholds::low_tier_min_fps`].
    pub low_tier_min_fps: Option<f32>,
    /// See [`PerformanceThresholds::high_tier_max_pixels`].
    pub high_tier_max_pixels: Option<u64>,
    /// See [`PerformanceThresholds::fps_sample_window_ms`].
    pub fps_sample_window_ms: Option<f64>,
    /// See [`PerformanceThresholds::degradation_trigger_count`].
    pub degradation_trigger_count: Option<u32>,
}

impl ThresholdsPatch {
    /// Parses a patch from a JSON string; absent fields stay unset.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// An error raised by the JSON configuration surfaces.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Read(String),
    /// The configuration content is not valid JSON for the target type.
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "failed to read configuration: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
