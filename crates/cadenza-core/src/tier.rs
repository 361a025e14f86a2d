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

//! The animation quality tier model.

use std::fmt::{self, Display};

/// Discrete animation-quality level selected from measured rendering
/// performance.
///
/// Tiers are totally ordered by capability: `Minimal < Low < Medium < High`.
/// The monitor starts every session at [`Tier::High`] and only moves down
/// after sustained evidence, so `High` is also the [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Essentially static presentation; transitions reduced to simple fades.
    Minimal,
    /// Cheap animations only, no compositing-heavy effects.
    Low,
    /// Reduced variants of the full animations.
    Medium,
    /// Everything enabled at full fidelity.
    High,
}

impl Tier {
    /// All tiers, most capable first. The order matches the fallback walk.
    pub const LADDER: [Tier; 4] = [Tier::High, Tier::Medium, Tier::Low, Tier::Minimal];

    /// Returns the next tier down the ladder, or `None` at the bottom.
    pub fn step_down(self) -> Option<Tier> {
        match self {
            Tier::High => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Low),
            Tier::Low => Some(Tier::Minimal),
            Tier::Minimal => None,
        }
    }

    /// Iterates from this tier downward to `Minimal`, inclusive.
    pub fn descending_from(self) -> impl Iterator<Item = Tier> {
        Self::LADDER.into_iter().skip_while(move |t| *t > self)
    }

    /// The tier's canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
            Tier::Minimal => "minimal",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::High
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
