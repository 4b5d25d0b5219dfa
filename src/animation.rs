//! Breathing circle scale, derived from the session's animation target.
//!
//! The controller only says where the circle should head; this animator turns
//! that into a smooth value per frame. Not advancing it (while paused) keeps
//! the interpolated value, so a resumed session continues from it.

use std::f32::consts::PI;

use crate::breathing::{PhaseChange, PhaseDurations, REST_SCALE};

/// Glide back to rest after a reset or stop.
pub const SETTLE_MS: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct ScaleAnimator {
    value: f32,
    from: f32,
    target: f32,
    elapsed_ms: u64,
    duration_ms: u64,
}

impl Default for ScaleAnimator {
    fn default() -> Self {
        Self::at(REST_SCALE)
    }
}

impl ScaleAnimator {
    pub fn at(value: f32) -> Self {
        Self {
            value,
            from: value,
            target: value,
            elapsed_ms: 0,
            duration_ms: 0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn retarget(&mut self, target: f32, duration_ms: u64) {
        self.from = self.value;
        self.target = target;
        self.elapsed_ms = 0;
        self.duration_ms = duration_ms;
        if duration_ms == 0 {
            self.value = target;
        }
    }

    /// Retarget for a phase the session just entered, spread over that
    /// phase's length. A change that keeps the target (Hold) is ignored.
    pub fn follow(&mut self, change: &PhaseChange, durations: &PhaseDurations) {
        if (change.animation_target - self.target).abs() > f32::EPSILON {
            self.retarget(change.animation_target, durations.get(change.to));
        }
    }

    pub fn settle(&mut self) {
        self.retarget(REST_SCALE, SETTLE_MS);
    }

    pub fn advance(&mut self, dt_ms: u64) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        if self.is_settled() {
            self.value = self.target;
            return self.value;
        }

        let t = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.value = self.from + (self.target - self.from) * ease_in_out(t);
        self.value
    }
}

fn ease_in_out(t: f32) -> f32 {
    0.5 - 0.5 * (PI * t.clamp(0.0, 1.0)).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::{BreathingPhase, FULL_SCALE};

    #[test]
    fn test_reaches_target_at_end() {
        let mut animator = ScaleAnimator::default();
        animator.retarget(FULL_SCALE, 4_000);

        let midway = animator.advance(2_000);
        assert!((midway - 0.75).abs() < 1e-4);
        assert_eq!(animator.advance(5_000), FULL_SCALE);
        assert!(animator.is_settled());
    }

    #[test]
    fn test_resume_continues_from_current_value() {
        let mut animator = ScaleAnimator::default();
        animator.retarget(FULL_SCALE, 4_000);
        let before_pause = animator.advance(1_000);

        // Paused: nothing advances, value is retained.
        assert_eq!(animator.value(), before_pause);

        let after_resume = animator.advance(1_000);
        assert!(after_resume > before_pause);
        assert!(after_resume < FULL_SCALE);
    }

    #[test]
    fn test_follow_ignores_hold() {
        let durations = PhaseDurations::default();
        let mut animator = ScaleAnimator::default();
        animator.follow(
            &PhaseChange {
                from: BreathingPhase::Exhale,
                to: BreathingPhase::Inhale,
                animation_target: FULL_SCALE,
                cycle_completed: true,
            },
            &durations,
        );
        animator.advance(3_000);
        let mid = animator.value();

        animator.follow(
            &PhaseChange {
                from: BreathingPhase::Inhale,
                to: BreathingPhase::Hold,
                animation_target: FULL_SCALE,
                cycle_completed: false,
            },
            &durations,
        );
        assert_eq!(animator.value(), mid);
        assert_eq!(animator.advance(1_000), FULL_SCALE);
    }

    #[test]
    fn test_settle_returns_to_rest() {
        let mut animator = ScaleAnimator::at(0.9);
        animator.settle();
        assert_eq!(animator.advance(SETTLE_MS), REST_SCALE);
    }
}
