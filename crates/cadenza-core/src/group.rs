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

//! Animation groups, variants, and selection results.
//!
//! Internally every lookup is keyed by these closed enums, so each
//! (group, tier) pair is statically guaranteed to resolve. Untyped string
//! inputs exist only at the host boundary and degrade to a fixed fallback
//! instead of failing.

use std::fmt::{self, Display};

/// Closed set of animation categories a host can ask the selector about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationGroup {
    /// Above-the-fold hero section centerpiece.
    Hero,
    /// Content cards and list items.
    Card,
    /// Headline and body text reveals.
    Text,
    /// Scroll-driven entrance effects.
    Scroll,
    /// Micro-interactions on controls (buttons, toggles).
    Micro,
    /// Ambient background layers.
    Background,
}

impl AnimationGroup {
    /// Every group, in catalog order.
    pub const ALL: [AnimationGroup; 6] = [
        AnimationGroup::Hero,
        AnimationGroup::Card,
        AnimationGroup::Text,
        AnimationGroup::Scroll,
        AnimationGroup::Micro,
        AnimationGroup::Background,
    ];

    /// The group's canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationGroup::Hero => "hero",
            AnimationGroup::Card => "card",
            AnimationGroup::Text => "text",
            AnimationGroup::Scroll => "scroll",
            AnimationGroup::Micro => "micro",
            AnimationGroup::Background => "background",
        }
    }

    /// Parses a group name arriving from an untyped boundary input.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "hero" => Some(AnimationGroup::Hero),
            "card" => Some(AnimationGroup::Card),
            "text" => Some(AnimationGroup::Text),
            "scroll" => Some(AnimationGroup::Scroll),
            "micro" => Some(AnimationGroup::Micro),
            "background" => Some(AnimationGroup::Background),
            _ => None,
        }
    }
}

impl Display for AnimationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Concrete animation implementations the selector can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationVariant {
    /// Rotating 3D globe hero.
    Globe3d,
    /// Flat-projected globe hero.
    GlobeFlat,
    /// Slow positional drift with parallax.
    ParallaxDrift,
    /// Single fade with a short upward translation.
    FadeUp,
    /// Perspective tilt following the pointer.
    Tilt3d,
    /// Elevation lift with a soft shadow.
    HoverLift,
    /// Combined fade and scale-in.
    FadeScale,
    /// Per-character staggered cascade.
    CharCascade,
    /// Per-word reveal.
    WordReveal,
    /// Whole-line fade.
    LineFade,
    /// Multi-layer scroll parallax.
    ParallaxLayers,
    /// Eased reveal tied to scroll progress.
    SmoothReveal,
    /// Plain opacity fade-in.
    FadeIn,
    /// Springy overshoot on activation.
    SpringBounce,
    /// Eased scale pulse.
    EaseScale,
    /// Opacity-only pulse.
    OpacityPulse,
    /// GPU particle field.
    ParticleField,
    /// Animated gradient drift.
    GradientDrift,
    /// Slow-moving glow spots.
    SoftGlow,
    /// Flat fill, nothing animated.
    SolidFill,
    /// Content appears without any transition.
    InstantShow,
}

impl AnimationVariant {
    /// The variant's canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationVariant::Globe3d => "globe-3d",
            AnimationVariant::GlobeFlat => "globe-flat",
            AnimationVariant::ParallaxDrift => "parallax-drift",
            AnimationVariant::FadeUp => "fade-up",
            AnimationVariant::Tilt3d => "tilt-3d",
            AnimationVariant::HoverLift => "hover-lift",
            AnimationVariant::FadeScale => "fade-scale",
            AnimationVariant::CharCascade => "char-cascade",
            AnimationVariant::WordReveal => "word-reveal",
            AnimationVariant::LineFade => "line-fade",
            AnimationVariant::ParallaxLayers => "parallax-layers",
            AnimationVariant::SmoothReveal => "smooth-reveal",
            AnimationVariant::FadeIn => "fade-in",
            AnimationVariant::SpringBounce => "spring-bounce",
            AnimationVariant::EaseScale => "ease-scale",
            AnimationVariant::OpacityPulse => "opacity-pulse",
            AnimationVariant::ParticleField => "particle-field",
            AnimationVariant::GradientDrift => "gradient-drift",
            AnimationVariant::SoftGlow => "soft-glow",
            AnimationVariant::SolidFill => "solid-fill",
            AnimationVariant::InstantShow => "instant-show",
        }
    }
}

impl Display for AnimationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering quality band a selection runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    /// Full fidelity.
    Full,
    /// Visibly simplified but still animated.
    Reduced,
    /// Bare-minimum motion.
    Minimal,
    /// No motion at all.
    Static,
}

impl Quality {
    /// The quality band's canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Full => "full",
            Quality::Reduced => "reduced",
            Quality::Minimal => "minimal",
            Quality::Static => "static",
        }
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An animation variant together with its cost profile.
///
/// Produced fresh on every selector call; selections have no identity and
/// are never retained by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSelection {
    /// The concrete animation to run.
    pub variant: AnimationVariant,
    /// Quality band the variant should render at.
    pub quality: Quality,
    /// Whether the variant should be composited on the GPU.
    pub use_gpu: bool,
    /// Relative cost on a 1 (trivial) to 10 (heaviest) scale.
    pub complexity: u8,
}

impl GroupSelection {
    /// The universal safe fallback returned for out-of-domain inputs.
    pub fn fallback() -> Self {
        Self {
            variant: AnimationVariant::FadeUp,
            quality: Quality::Static,
            use_gpu: false,
            complexity: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names_round_trip() {
        for group in AnimationGroup::ALL {
            assert_eq!(AnimationGroup::parse(group.as_str()), Some(group));
        }
    }

    #[test]
    fn test_unknown_group_name_is_none() {
        assert_eq!(AnimationGroup::parse("not-a-real-group"), None);
        assert_eq!(AnimationGroup::parse(""), None);
        // Parsing is exact; no case folding at the boundary.
        assert_eq!(AnimationGroup::parse("Hero"), None);
    }

    #[test]
    fn test_fallback_selection_is_static_fade() {
        let fallback = GroupSelection::fallback();
        assert_eq!(fallback.variant, AnimationVariant::FadeUp);
        assert_eq!(fallback.quality, Quality::Static);
        assert!(!fallback.use_gpu);
        assert_eq!(fallback.complexity, 1);
    }

    #[test]
    fn test_variant_names_are_kebab_case() {
        assert_eq!(AnimationVariant::Globe3d.to_string(), "globe-3d");
        assert_eq!(AnimationVariant::CharCascade.to_string(), "char-cascade");
    }
}
