use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PatternError;

/// Circle scale at rest (fully exhaled, or idle).
pub const REST_SCALE: f32 = 0.5;
/// Circle scale at the top of an inhale.
pub const FULL_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl Default for BreathingPhase {
    fn default() -> Self {
        BreathingPhase::Inhale
    }
}

impl BreathingPhase {
    pub const ALL: [BreathingPhase; 3] = [
        BreathingPhase::Inhale,
        BreathingPhase::Hold,
        BreathingPhase::Exhale,
    ];

    /// Successor in the cycle. Exhale wraps back to Inhale.
    pub const fn next(self) -> Self {
        match self {
            BreathingPhase::Inhale => BreathingPhase::Hold,
            BreathingPhase::Hold => BreathingPhase::Exhale,
            BreathingPhase::Exhale => BreathingPhase::Inhale,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "inhale",
            BreathingPhase::Hold => "hold",
            BreathingPhase::Exhale => "exhale",
        }
    }

    /// Text shown inside the breathing circle.
    pub fn instruction(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Breathe In",
            BreathingPhase::Hold => "Hold",
            BreathingPhase::Exhale => "Breathe Out",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "#10B981",
            BreathingPhase::Hold => "#F59E0B",
            BreathingPhase::Exhale => "#3B82F6",
        }
    }

    /// Scale the circle should head towards once this phase is entered.
    /// Hold has no target of its own and keeps whatever Inhale reached.
    pub fn animation_target(&self, previous: f32) -> f32 {
        match self {
            BreathingPhase::Inhale => FULL_SCALE,
            BreathingPhase::Hold => previous,
            BreathingPhase::Exhale => REST_SCALE,
        }
    }
}

impl fmt::Display for BreathingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDurations {
    inhale_ms: u64,
    hold_ms: u64,
    exhale_ms: u64,
}

impl TryFrom<RawDurations> for PhaseDurations {
    type Error = PatternError;

    fn try_from(raw: RawDurations) -> Result<Self, Self::Error> {
        PhaseDurations::new(raw.inhale_ms, raw.hold_ms, raw.exhale_ms)
    }
}

/// Length of each phase in milliseconds. All three are always non-zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawDurations")]
pub struct PhaseDurations {
    inhale_ms: u64,
    hold_ms: u64,
    exhale_ms: u64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            inhale_ms: 4_000,
            hold_ms: 2_000,
            exhale_ms: 6_000,
        }
    }
}

impl PhaseDurations {
    pub fn new(inhale_ms: u64, hold_ms: u64, exhale_ms: u64) -> Result<Self, PatternError> {
        let durations = Self {
            inhale_ms,
            hold_ms,
            exhale_ms,
        };

        for phase in BreathingPhase::ALL {
            if durations.get(phase) == 0 {
                return Err(PatternError::NonPositiveDuration { phase });
            }
        }

        Ok(durations)
    }

    pub fn from_secs(inhale: u64, hold: u64, exhale: u64) -> Result<Self, PatternError> {
        Self::new(
            inhale.saturating_mul(1_000),
            hold.saturating_mul(1_000),
            exhale.saturating_mul(1_000),
        )
    }

    pub fn get(&self, phase: BreathingPhase) -> u64 {
        match phase {
            BreathingPhase::Inhale => self.inhale_ms,
            BreathingPhase::Hold => self.hold_ms,
            BreathingPhase::Exhale => self.exhale_ms,
        }
    }

    pub fn cycle_ms(&self) -> u64 {
        self.inhale_ms
            .saturating_add(self.hold_ms)
            .saturating_add(self.exhale_ms)
    }

    /// Milliseconds from the start of a cycle to the start of `phase`.
    pub fn offset_of(&self, phase: BreathingPhase) -> u64 {
        match phase {
            BreathingPhase::Inhale => 0,
            BreathingPhase::Hold => self.inhale_ms,
            BreathingPhase::Exhale => self.inhale_ms.saturating_add(self.hold_ms),
        }
    }
}
