//! Figures shown under the breathing circle.

use serde::Serialize;

use crate::breathing::{PhaseDurations, SessionState};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub completed_cycles: u64,
    /// Time spent in completed cycles.
    pub breathing_ms: u64,
    /// Whole minutes, rounded up.
    pub minutes: u64,
    pub cycle_remaining_ms: u64,
    /// Position inside the current cycle, 0.0 to 1.0.
    pub cycle_progress: f32,
}

impl SessionStats {
    pub fn from_state(state: &SessionState, durations: &PhaseDurations) -> Self {
        let cycle_ms = durations.cycle_ms();
        let breathing_ms = state.completed_cycles.saturating_mul(cycle_ms);
        let into_cycle = durations
            .offset_of(state.current_phase)
            .saturating_add(state.elapsed_in_phase_ms)
            .min(cycle_ms);

        Self {
            completed_cycles: state.completed_cycles,
            breathing_ms,
            minutes: breathing_ms.div_ceil(60_000),
            cycle_remaining_ms: cycle_ms - into_cycle,
            cycle_progress: into_cycle as f32 / cycle_ms as f32,
        }
    }

    /// Countdown in whole seconds, rounded up.
    pub fn cycle_remaining_secs(&self) -> u64 {
        self.cycle_remaining_ms.div_ceil(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::BreathingPhase;

    fn state(cycles: u64, phase: BreathingPhase, elapsed: u64) -> SessionState {
        SessionState {
            completed_cycles: cycles,
            current_phase: phase,
            elapsed_in_phase_ms: elapsed,
            ..SessionState::default()
        }
    }

    #[test]
    fn test_minutes_round_up() {
        let durations = PhaseDurations::default();

        assert_eq!(SessionStats::from_state(&state(0, BreathingPhase::Inhale, 0), &durations).minutes, 0);
        assert_eq!(SessionStats::from_state(&state(1, BreathingPhase::Inhale, 0), &durations).minutes, 1);
        assert_eq!(SessionStats::from_state(&state(5, BreathingPhase::Inhale, 0), &durations).minutes, 1);
        assert_eq!(SessionStats::from_state(&state(6, BreathingPhase::Inhale, 0), &durations).minutes, 2);
    }

    #[test]
    fn test_cycle_countdown() {
        let durations = PhaseDurations::default();
        let stats = SessionStats::from_state(&state(2, BreathingPhase::Exhale, 1_500), &durations);

        assert_eq!(stats.breathing_ms, 24_000);
        assert_eq!(stats.cycle_remaining_ms, 4_500);
        assert_eq!(stats.cycle_remaining_secs(), 5);
        assert!((stats.cycle_progress - 0.625).abs() < 1e-6);
    }
}
