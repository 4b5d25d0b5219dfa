use serde::Serialize;

use super::phase::{BreathingPhase, REST_SCALE};

/// Next phase in the Inhale -> Hold -> Exhale cycle.
pub const fn advance(phase: BreathingPhase) -> BreathingPhase {
    phase.next()
}

/// One phase step, as reported to observers.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    pub from: BreathingPhase,
    pub to: BreathingPhase,
    pub animation_target: f32,
    /// True only on the Exhale -> Inhale step.
    pub cycle_completed: bool,
}

#[derive(Debug, Clone)]
pub struct PhaseSequencer {
    phase: BreathingPhase,
    animation_target: f32,
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self {
            phase: BreathingPhase::Inhale,
            animation_target: REST_SCALE,
        }
    }
}

impl PhaseSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> BreathingPhase {
        self.phase
    }

    pub fn animation_target(&self) -> f32 {
        self.animation_target
    }

    /// Apply the current phase's animation target without moving. Called when
    /// a fresh session begins in the phase it is already sitting on.
    pub fn enter_current(&mut self) -> f32 {
        self.animation_target = self.phase.animation_target(self.animation_target);
        self.animation_target
    }

    /// Move exactly one phase forward.
    pub fn step(&mut self) -> PhaseChange {
        let from = self.phase;
        let to = advance(from);
        self.phase = to;
        self.animation_target = to.animation_target(self.animation_target);

        PhaseChange {
            from,
            to,
            animation_target: self.animation_target,
            cycle_completed: from == BreathingPhase::Exhale,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::phase::FULL_SCALE;

    #[test]
    fn test_advance_repeats_pattern() {
        let mut phase = BreathingPhase::Inhale;
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push(phase);
            phase = advance(phase);
        }

        let expected: Vec<_> = BreathingPhase::ALL.iter().copied().cycle().take(9).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_step_reports_cycle_on_exhale_only() {
        let mut sequencer = PhaseSequencer::new();

        let to_hold = sequencer.step();
        assert_eq!(to_hold.to, BreathingPhase::Hold);
        assert!(!to_hold.cycle_completed);

        let to_exhale = sequencer.step();
        assert!(!to_exhale.cycle_completed);

        let to_inhale = sequencer.step();
        assert_eq!(to_inhale.from, BreathingPhase::Exhale);
        assert_eq!(to_inhale.to, BreathingPhase::Inhale);
        assert!(to_inhale.cycle_completed);
    }

    #[test]
    fn test_animation_targets_follow_phases() {
        let mut sequencer = PhaseSequencer::new();
        assert_eq!(sequencer.animation_target(), REST_SCALE);

        assert_eq!(sequencer.enter_current(), FULL_SCALE);
        assert_eq!(sequencer.step().animation_target, FULL_SCALE); // hold
        assert_eq!(sequencer.step().animation_target, REST_SCALE); // exhale
        assert_eq!(sequencer.step().animation_target, FULL_SCALE); // inhale

        sequencer.reset();
        assert_eq!(sequencer.current(), BreathingPhase::Inhale);
        assert_eq!(sequencer.animation_target(), REST_SCALE);
    }
}
