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

//! Tier-change notifications and the broadcast channel that carries them.

pub mod bus;

pub use bus::{Broadcast, Subscription};

use crate::tier::Tier;

/// How far below the comfortable bands the measured FPS fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// FPS within or above the medium band.
    Mild,
    /// FPS inside the low band.
    Moderate,
    /// FPS below the low band.
    Severe,
}

/// Broadcast payload fired when the monitor's confirmed tier changes.
///
/// Ephemeral: consumed by subscribers at delivery time and retained
/// nowhere in the core.
#[derive(Debug, Clone, PartialEq)]
pub struct TierEvent {
    /// The windowed FPS measurement that triggered the change.
    pub fps: f32,
    /// The tier the monitor has moved to.
    pub recommended_tier: Tier,
    /// The tier the monitor moved away from.
    pub previous_tier: Tier,
    /// Severity derived from `fps` against the configured bands.
    pub severity: Severity,
}

impl TierEvent {
    /// `true` when this event reports a downgrade rather than a recovery.
    pub fn is_degradation(&self) -> bool {
        self.recommended_tier < self.previous_tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degradation_direction() {
        let event = TierEvent {
            fps: 20.0,
            recommended_tier: Tier::Low,
            previous_tier: Tier::High,
            severity: Severity::Moderate,
        };
        assert!(event.is_degradation());

        let recovery = TierEvent {
            fps: 60.0,
            recommended_tier: Tier::High,
            previous_tier: Tier::Low,
            severity: Severity::Mild,
        };
        assert!(!recovery.is_degradation());
    }
}
