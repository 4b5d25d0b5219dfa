use thiserror::Error;

use crate::breathing::BreathingPhase;

/// Errors raised while building a breathing pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("{phase} duration must be greater than zero")]
    NonPositiveDuration { phase: BreathingPhase },

    #[error("unknown breathing pattern: {0}")]
    UnknownPattern(String),

    #[error("tick interval and per-tick delta must be at least one millisecond")]
    ZeroTick,
}
