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

//! The tier state machine fed by per-frame timestamps.
//!
//! [`TierEngine`] is fully deterministic: it holds no clock and spawns
//! nothing. The service layer feeds it one `on_frame` call per rendered
//! frame; it accumulates frame and dropped-frame counts, closes a sampling
//! window every `fps_sample_window_ms`, and applies the asymmetric
//! transition rule (hysteresis-confirmed downgrades, immediate upgrades).

use crate::sampling::SampleWindow;
use cadenza_core::{FpsMetrics, PerformanceThresholds, ThresholdsPatch, Tier, TierEvent};

/// Nominal per-frame budget at the 60 Hz target, in milliseconds.
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// A frame is "dropped" once it runs past this multiple of the budget.
const DROPPED_FRAME_FACTOR: f64 = 1.5;

/// FPS variance across windows above which a close logs a stutter warning
/// (roughly a sustained ±10 FPS swing).
const STUTTER_VARIANCE: f32 = 100.0;

/// Window closes between one-line summary logs at info level.
const SUMMARY_EVERY_WINDOWS: u32 = 10;

/// Deterministic tier state machine.
///
/// Tier changes obey the transition rule: a downgrade needs
/// `degradation_trigger_count` consecutive unfavorable windows, a matching
/// window decays the streak by one, and an upgrade fires on the first
/// favorable window. The asymmetry is deliberate: recovered headroom is
/// trusted immediately, degradation only after sustained evidence.
#[derive(Debug)]
pub struct TierEngine {
    thresholds: PerformanceThresholds,
    tier: Tier,
    low_fps_streak: u32,
    samples: SampleWindow,
    metrics: FpsMetrics,
    window_start_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    window_frames: u32,
    window_dropped: u64,
    total_frames: u64,
    total_dropped: u64,
    viewport_pixels: Option<u64>,
    windows_since_summary: u32,
}

impl TierEngine {
    /// Creates an engine starting at [`Tier::High`].
    pub fn new(thresholds: PerformanceThresholds) -> Self {
        Self {
            thresholds,
            tier: Tier::High,
            low_fps_streak: 0,
            samples: SampleWindow::new(),
            metrics: FpsMetrics::default(),
            window_start_ms: None,
            last_frame_ms: None,
            window_frames: 0,
            window_dropped: 0,
            total_frames: 0,
            total_dropped: 0,
            viewport_pixels: None,
            windows_since_summary: 0,
        }
    }

    /// The currently confirmed tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Snapshot of the most recent window statistics.
    pub fn metrics(&self) -> FpsMetrics {
        self.metrics.clone()
    }

    /// The active threshold configuration.
    pub fn thresholds(&self) -> &PerformanceThresholds {
        &self.thresholds
    }

    /// Merges a partial threshold update; takes effect from the next
    /// window close.
    pub fn apply_thresholds(&mut self, patch: ThresholdsPatch) {
        self.thresholds.apply(patch);
    }

    /// Records the host's rendered surface size.
    ///
    /// While the pixel count exceeds `high_tier_max_pixels`, window
    /// recommendations are capped at [`Tier::Medium`]: oversized surfaces
    /// never auto-select the heaviest animations however good the FPS is.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_pixels = Some(u64::from(width) * u64::from(height));
    }

    /// Manually pins the tier.
    ///
    /// Resets the downgrade streak so the next natural recommendation does
    /// not instantly fight the forced value. No event is broadcast; the
    /// caller made the change, so there is nothing to notify it about.
    pub fn force_tier(&mut self, tier: Tier) {
        log::info!("TierEngine: tier forced to {} (was {}).", tier, self.tier);
        self.tier = tier;
        self.low_fps_streak = 0;
    }

    /// Drops the current window anchors so sampling re-anchors on the
    /// next frame.
    ///
    /// Used when sampling resumes after a stop: without this, the gap
    /// since the last observed frame would read as an enormous stall.
    pub fn rebase(&mut self) {
        self.window_start_ms = None;
        self.last_frame_ms = None;
        self.window_frames = 0;
        self.window_dropped = 0;
    }

    /// Clears all accumulated state back to a fresh start.
    ///
    /// Configuration (thresholds) survives; measurements do not.
    pub fn reset(&mut self) {
        self.tier = Tier::High;
        self.low_fps_streak = 0;
        self.samples.clear();
        self.metrics = FpsMetrics::default();
        self.window_start_ms = None;
        self.last_frame_ms = None;
        self.window_frames = 0;
        self.window_dropped = 0;
        self.total_frames = 0;
        self.total_dropped = 0;
        self.viewport_pixels = None;
        self.windows_since_summary = 0;
    }

    /// Feeds one frame timestamp (ms) into the engine.
    ///
    /// Returns a [`TierEvent`] when this frame closed a sampling window
    /// that confirmed a tier transition.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Option<TierEvent> {
        let window_start = *self.window_start_ms.get_or_insert(timestamp_ms);

        if let Some(last) = self.last_frame_ms {
            let frame_time = timestamp_ms - last;
            self.window_frames += 1;
            self.total_frames += 1;
            if frame_time > NOMINAL_FRAME_MS * DROPPED_FRAME_FACTOR {
                // A stall spanning several budgets counts as several
                // missed frames, not one.
                let missed = (frame_time / NOMINAL_FRAME_MS).floor() as u64;
                self.window_dropped += missed.saturating_sub(1);
            }
        }
        self.last_frame_ms = Some(timestamp_ms);

        let elapsed = timestamp_ms - window_start;
        if elapsed >= self.thresholds.fps_sample_window_ms && elapsed > 0.0 {
            let event = self.close_window(timestamp_ms, elapsed);
            self.window_start_ms = Some(timestamp_ms);
            self.window_frames = 0;
            self.window_dropped = 0;
            return event;
        }
        None
    }

    fn close_window(&mut self, now_ms: f64, elapsed_ms: f64) -> Option<TierEvent> {
        let current_fps = self.window_frames as f32 * 1000.0 / elapsed_ms as f32;
        self.samples.push(current_fps);
        self.total_dropped += self.window_dropped;

        self.metrics = FpsMetrics {
            current: current_fps,
            average: self.samples.average(),
            min: self.samples.min(),
            max: self.samples.max(),
            dropped_frames: self.total_dropped,
            drop_rate: if self.total_frames == 0 {
                0.0
            } else {
                self.total_dropped as f32 / self.total_frames as f32
            },
            last_update_ms: now_ms,
        };

        let variance = self.samples.variance();
        if variance > STUTTER_VARIANCE {
            log::warn!(
                "TierEngine: stutter detected (FPS variance {:.1} across {} windows).",
                variance,
                self.samples.len()
            );
        }

        self.windows_since_summary += 1;
        if self.windows_since_summary >= SUMMARY_EVERY_WINDOWS {
            self.windows_since_summary = 0;
            log::info!(
                "TierEngine: tier={} fps={:.1} (avg {:.1}, min {:.1}, max {:.1}), drop rate {:.3}.",
                self.tier,
                current_fps,
                self.metrics.average,
                self.metrics.min,
                self.metrics.max,
                self.metrics.drop_rate
            );
        } else {
            log::debug!(
                "TierEngine: window closed at {:.1} fps ({} dropped).",
                current_fps,
                self.window_dropped
            );
        }

        let mut recommended = self.thresholds.classify(current_fps);
        if let Some(pixels) = self.viewport_pixels {
            if pixels > self.thresholds.high_tier_max_pixels && recommended > Tier::Medium {
                recommended = Tier::Medium;
            }
        }
        self.apply_transition(recommended, current_fps)
    }

    fn apply_transition(&mut self, recommended: Tier, fps: f32) -> Option<TierEvent> {
        use std::cmp::Ordering;

        match recommended.cmp(&self.tier) {
            Ordering::Less => {
                self.low_fps_streak += 1;
                if self.low_fps_streak >= self.thresholds.degradation_trigger_count {
                    let previous = self.tier;
                    self.tier = recommended;
                    self.low_fps_streak = 0;
                    log::warn!(
                        "TierEngine: degrading {} -> {} after sustained {:.1} fps.",
                        previous,
                        recommended,
                        fps
                    );
                    return Some(TierEvent {
                        fps,
                        recommended_tier: recommended,
                        previous_tier: previous,
                        severity: self.thresholds.severity(fps),
                    });
                }
                None
            }
            // A single good window does not erase a building downgrade
            // trend; the streak decays instead of resetting.
            Ordering::Equal => {
                self.low_fps_streak = self.low_fps_streak.saturating_sub(1);
                None
            }
            Ordering::Greater => {
                let previous = self.tier;
                self.tier = recommended;
                self.low_fps_streak = 0;
                log::info!(
                    "TierEngine: recovering {} -> {} at {:.1} fps.",
                    previous,
                    recommended,
                    fps
                );
                Some(TierEvent {
                    fps,
                    recommended_tier: recommended,
                    previous_tier: previous,
                    severity: self.thresholds.severity(fps),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::Severity;

    const FRAME_60HZ: f64 = 1000.0 / 60.0;

    /// Drives evenly spaced frames over one full sampling window and
    /// returns the event (if any) from the window close.
    fn drive_window(engine: &mut TierEngine, start_ms: f64, frame_ms: f64) -> Option<TierEvent> {
        let window = engine.thresholds().fps_sample_window_ms;
        let frames = (window / frame_ms).ceil() as u32 + 1;
        let mut event = None;
        for i in 1..=frames {
            if let Some(e) = engine.on_frame(start_ms + f64::from(i) * frame_ms) {
                event = Some(e);
            }
        }
        event
    }

    /// Timestamp just past the end of the last driven window.
    fn window_end(engine: &TierEngine, start_ms: f64, frame_ms: f64) -> f64 {
        let window = engine.thresholds().fps_sample_window_ms;
        let frames = (window / frame_ms).ceil() as u32 + 1;
        start_ms + f64::from(frames) * frame_ms
    }

    #[test]
    fn test_steady_60fps_stays_high_with_no_events() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;
        for _ in 0..3 {
            let event = drive_window(&mut engine, start, FRAME_60HZ);
            assert_eq!(event, None);
            assert_eq!(engine.tier(), Tier::High);
            start = window_end(&engine, start, FRAME_60HZ);
        }
        assert!(engine.metrics().current > 55.0);
        assert_eq!(engine.metrics().dropped_frames, 0);
    }

    #[test]
    fn test_downgrade_confirmed_only_after_trigger_count() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        // 50 ms frames = 20 FPS, inside the low band (15..30).
        let mut start = 0.0;

        let first = drive_window(&mut engine, start, 50.0);
        assert_eq!(first, None);
        assert_eq!(engine.tier(), Tier::High);
        start = window_end(&engine, start, 50.0);

        let second = drive_window(&mut engine, start, 50.0);
        assert_eq!(second, None);
        assert_eq!(engine.tier(), Tier::High);
        start = window_end(&engine, start, 50.0);

        let third = drive_window(&mut engine, start, 50.0);
        let event = third.expect("third unfavorable window must confirm the downgrade");
        assert_eq!(event.previous_tier, Tier::High);
        assert_eq!(event.recommended_tier, Tier::Low);
        assert_eq!(event.severity, Severity::Moderate);
        assert!(event.is_degradation());
        assert_eq!(engine.tier(), Tier::Low);
    }

    #[test]
    fn test_matching_window_decays_streak_instead_of_resetting() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;

        // Two unfavorable windows build a streak of 2.
        for _ in 0..2 {
            assert_eq!(drive_window(&mut engine, start, 50.0), None);
            start = window_end(&engine, start, 50.0);
        }
        // One good window decays the streak to 1...
        assert_eq!(drive_window(&mut engine, start, FRAME_60HZ), None);
        start = window_end(&engine, start, FRAME_60HZ);

        // ...so one more bad window (streak 2) still isn't enough...
        assert_eq!(drive_window(&mut engine, start, 50.0), None);
        start = window_end(&engine, start, 50.0);

        // ...but the next one (streak 3) confirms.
        let event = drive_window(&mut engine, start, 50.0);
        assert!(event.is_some());
        assert_eq!(engine.tier(), Tier::Low);
    }

    #[test]
    fn test_upgrade_fires_on_first_favorable_window() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        engine.force_tier(Tier::Low);

        let event = drive_window(&mut engine, 0.0, FRAME_60HZ)
            .expect("recovery must fire without hysteresis");
        assert_eq!(event.previous_tier, Tier::Low);
        assert_eq!(event.recommended_tier, Tier::High);
        assert_eq!(event.severity, Severity::Mild);
        assert!(!event.is_degradation());
        assert_eq!(engine.tier(), Tier::High);
    }

    #[test]
    fn test_force_tier_resets_streak() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;

        // Build a streak of 2 toward a downgrade.
        for _ in 0..2 {
            assert_eq!(drive_window(&mut engine, start, 50.0), None);
            start = window_end(&engine, start, 50.0);
        }

        engine.force_tier(Tier::Low);
        assert_eq!(engine.tier(), Tier::Low);

        // The next high-band window produces exactly the expected upgrade
        // event and nothing else.
        let event = drive_window(&mut engine, start, FRAME_60HZ);
        let event = event.expect("upgrade expected");
        assert_eq!(event.previous_tier, Tier::Low);
        assert_eq!(event.recommended_tier, Tier::High);
    }

    #[test]
    fn test_force_tier_defuses_pending_downgrade() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;

        for _ in 0..2 {
            assert_eq!(drive_window(&mut engine, start, 50.0), None);
            start = window_end(&engine, start, 50.0);
        }

        // Forcing the current tier again clears the building streak, so
        // the third unfavorable window starts the count from scratch.
        engine.force_tier(Tier::High);
        assert_eq!(drive_window(&mut engine, start, 50.0), None);
        assert_eq!(engine.tier(), Tier::High);
    }

    #[test]
    fn test_dropped_frames_count_multi_frame_stalls() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        engine.on_frame(0.0);
        // A 95 ms stall spans 5.7 budgets: four whole frames went missing.
        engine.on_frame(95.0);
        // A 1005 ms stall (60.3 budgets) closes the window with 59 more.
        engine.on_frame(1100.0);

        assert_eq!(engine.metrics().dropped_frames, 4 + 59);
        assert!(engine.metrics().drop_rate > 0.0);
    }

    #[test]
    fn test_frames_at_budget_are_not_dropped() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        drive_window(&mut engine, 0.0, FRAME_60HZ);
        assert_eq!(engine.metrics().dropped_frames, 0);
        assert_eq!(engine.metrics().drop_rate, 0.0);
    }

    #[test]
    fn test_metrics_track_history_extremes() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;
        drive_window(&mut engine, start, FRAME_60HZ);
        start = window_end(&engine, start, FRAME_60HZ);
        drive_window(&mut engine, start, 50.0);

        let metrics = engine.metrics();
        assert!(metrics.min < 25.0);
        assert!(metrics.max > 55.0);
        assert!(metrics.average > metrics.min && metrics.average < metrics.max);
        assert!(metrics.last_update_ms > 0.0);
    }

    #[test]
    fn test_oversized_viewport_caps_recommendation_at_medium() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        engine.set_viewport(3840, 2160);
        engine.force_tier(Tier::Low);

        // Recovery at 60 FPS would normally reach High; the 4K viewport
        // caps it at Medium.
        let event = drive_window(&mut engine, 0.0, FRAME_60HZ).expect("upgrade expected");
        assert_eq!(event.recommended_tier, Tier::Medium);
        assert_eq!(engine.tier(), Tier::Medium);
    }

    #[test]
    fn test_budget_sized_viewport_still_reaches_high() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        engine.set_viewport(1920, 1080);
        engine.force_tier(Tier::Low);

        let event = drive_window(&mut engine, 0.0, FRAME_60HZ).expect("upgrade expected");
        assert_eq!(event.recommended_tier, Tier::High);
    }

    #[test]
    fn test_threshold_patch_applies_to_later_windows() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        engine.apply_thresholds(ThresholdsPatch {
            degradation_trigger_count: Some(1),
            ..Default::default()
        });

        // With the trigger at 1, a single low window downgrades.
        let event = drive_window(&mut engine, 0.0, 50.0);
        assert!(event.is_some());
        assert_eq!(engine.tier(), Tier::Low);
    }

    #[test]
    fn test_reset_returns_to_fresh_state_keeping_thresholds() {
        let mut engine = TierEngine::new(PerformanceThresholds {
            degradation_trigger_count: 1,
            ..Default::default()
        });
        drive_window(&mut engine, 0.0, 50.0);
        assert_eq!(engine.tier(), Tier::Low);

        engine.reset();
        assert_eq!(engine.tier(), Tier::High);
        assert_eq!(engine.metrics(), FpsMetrics::default());
        assert_eq!(engine.thresholds().degradation_trigger_count, 1);
    }

    #[test]
    fn test_minimal_band_downgrade_is_severe() {
        let mut engine = TierEngine::new(PerformanceThresholds::default());
        let mut start = 0.0;
        let mut last_event = None;
        // 125 ms frames = 8 FPS, below the low threshold.
        for _ in 0..3 {
            if let Some(e) = drive_window(&mut engine, start, 125.0) {
                last_event = Some(e);
            }
            start = window_end(&engine, start, 125.0);
        }
        let event = last_event.expect("downgrade expected");
        assert_eq!(event.recommended_tier, Tier::Minimal);
        assert_eq!(event.severity, Severity::Severe);
    }
}
