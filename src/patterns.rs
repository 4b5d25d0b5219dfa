//! Built-in breathing patterns.
//!
//! Every pattern has a non-zero hold so it maps onto the three-phase
//! Inhale / Hold / Exhale cycle.

use serde::Serialize;

use crate::{breathing::PhaseDurations, error::PatternError};

pub const DEFAULT_PATTERN_ID: &str = "4-2-6";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathPattern {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub durations: PhaseDurations,
    pub recommended_cycles: u32,
}

impl BreathPattern {
    pub fn breaths_per_minute(&self) -> f32 {
        60_000.0 / self.durations.cycle_ms() as f32
    }
}

fn pattern(
    id: &'static str,
    label: &'static str,
    description: &'static str,
    secs: (u64, u64, u64),
    recommended_cycles: u32,
) -> Option<BreathPattern> {
    let durations = PhaseDurations::from_secs(secs.0, secs.1, secs.2).ok()?;
    Some(BreathPattern {
        id,
        label,
        description,
        durations,
        recommended_cycles,
    })
}

pub fn builtin_patterns() -> Vec<BreathPattern> {
    [
        pattern(
            DEFAULT_PATTERN_ID,
            "Relaxation",
            "Inhale for 4 seconds, hold for 2, exhale for 6. Repeat for optimal relaxation.",
            (4, 2, 6),
            5,
        ),
        pattern(
            "4-7-8",
            "Tranquility",
            "A natural tranquilizer for the nervous system.",
            (4, 7, 8),
            4,
        ),
        pattern(
            "triangle",
            "Balance",
            "Equal inhale, hold and exhale for emotional stability.",
            (4, 4, 4),
            6,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn get_pattern(id: &str) -> Result<BreathPattern, PatternError> {
    builtin_patterns()
        .into_iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| PatternError::UnknownPattern(id.to_string()))
}
