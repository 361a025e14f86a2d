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

//! Tier-appropriate animation selection.
//!
//! A pure, total mapping from (group, tier) to the animation variant and
//! cost profile that fits the performance budget. No state, no I/O, and no
//! operation here can fail: typed lookups are exhaustive over the closed
//! enums, and untyped boundary inputs degrade to the universal fallback.

use cadenza_core::{AnimationGroup, AnimationVariant, GroupSelection, Quality, Tier};

/// Complexity at or above which an animation should be composited on the
/// GPU rather than animated on the CPU.
pub const GPU_COMPLEXITY_THRESHOLD: u8 = 6;

/// Looks up the variant and cost profile for a group at a tier.
///
/// Exhaustive over both enums, so every pair resolves statically.
pub fn select(group: AnimationGroup, tier: Tier) -> GroupSelection {
    use AnimationGroup::*;
    use AnimationVariant::*;

    match (group, tier) {
        (Hero, Tier::High) => entry(Globe3d, Quality::Full, true, 10),
        (Hero, Tier::Medium) => entry(GlobeFlat, Quality::Reduced, true, 6),
        (Hero, Tier::Low) => entry(ParallaxDrift, Quality::Minimal, false, 3),
        (Hero, Tier::Minimal) => entry(FadeUp, Quality::Static, false, 1),

        (Card, Tier::High) => entry(Tilt3d, Quality::Full, true, 7),
        (Card, Tier::Medium) => entry(HoverLift, Quality::Reduced, false, 5),
        (Card, Tier::Low) => entry(FadeScale, Quality::Minimal, false, 2),
        (Card, Tier::Minimal) => entry(FadeUp, Quality::Static, false, 1),

        (Text, Tier::High) => entry(CharCascade, Quality::Full, false, 5),
        (Text, Tier::Medium) => entry(WordReveal, Quality::Reduced, false, 3),
        (Text, Tier::Low) => entry(LineFade, Quality::Minimal, false, 2),
        (Text, Tier::Minimal) => entry(FadeUp, Quality::Static, false, 1),

        (Scroll, Tier::High) => entry(ParallaxLayers, Quality::Full, true, 8),
        (Scroll, Tier::Medium) => entry(SmoothReveal, Quality::Reduced, false, 4),
        (Scroll, Tier::Low) => entry(FadeIn, Quality::Minimal, false, 2),
        (Scroll, Tier::Minimal) => entry(InstantShow, Quality::Static, false, 1),

        (Micro, Tier::High) => entry(SpringBounce, Quality::Full, false, 4),
        (Micro, Tier::Medium) => entry(EaseScale, Quality::Reduced, false, 3),
        (Micro, Tier::Low) => entry(OpacityPulse, Quality::Minimal, false, 2),
        (Micro, Tier::Minimal) => entry(InstantShow, Quality::Static, false, 1),

        (Background, Tier::High) => entry(ParticleField, Quality::Full, true, 9),
        (Background, Tier::Medium) => entry(GradientDrift, Quality::Reduced, true, 6),
        (Background, Tier::Low) => entry(SoftGlow, Quality::Minimal, false, 2),
        (Background, Tier::Minimal) => entry(SolidFill, Quality::Static, false, 1),
    }
}

/// Boundary entry for untyped group names.
///
/// Total over all possible strings: an unrecognized name returns the fixed
/// safe fallback instead of raising.
pub fn select_for_group(name: &str, tier: Tier) -> GroupSelection {
    match AnimationGroup::parse(name) {
        Some(group) => select(group, tier),
        None => {
            log::debug!("selector: unknown animation group '{name}', using static fallback.");
            GroupSelection::fallback()
        }
    }
}

/// Every variant a group defines across all tiers, most capable first.
///
/// A catalog listing independent of the current tier; variants shared by
/// several tiers appear once.
pub fn animations_for_group(group: AnimationGroup) -> Vec<AnimationVariant> {
    let mut variants = Vec::with_capacity(Tier::LADDER.len());
    for tier in Tier::LADDER {
        let variant = select(group, tier).variant;
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

/// Whether `variant` is exactly what `select` would hand out for this
/// group and tier.
///
/// An exact-match tie-break, not "acceptable at or below this tier".
pub fn is_suitable_for_tier(group: AnimationGroup, variant: AnimationVariant, tier: Tier) -> bool {
    select(group, tier).variant == variant
}

/// Resolves a selection, walking down the tier ladder from the requested
/// tier until an entry is found.
///
/// The table is fully populated today, so the walk resolves at the
/// requested tier; the ladder exists to tolerate a sparsely-defined table.
pub fn with_fallback(group: AnimationGroup, tier: Tier) -> GroupSelection {
    tier.descending_from()
        .map(|t| select(group, t))
        .next()
        .unwrap_or_else(GroupSelection::fallback)
}

/// Whether an animation of the given complexity should run on the GPU.
pub fn should_use_gpu(complexity: u8) -> bool {
    complexity >= GPU_COMPLEXITY_THRESHOLD
}

fn entry(variant: AnimationVariant, quality: Quality, use_gpu: bool, complexity: u8) -> GroupSelection {
    GroupSelection {
        variant,
        quality,
        use_gpu,
        complexity,
    }
}
