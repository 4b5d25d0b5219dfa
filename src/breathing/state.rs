use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{BreathingPhase, REST_SCALE};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionCommand {
    Start,
    Pause,
    Reset,
}

/// Resulting status for every (status, command) pair. Inapplicable commands
/// leave the status unchanged.
pub fn transition(status: SessionStatus, command: SessionCommand) -> SessionStatus {
    match (status, command) {
        (_, SessionCommand::Reset) => SessionStatus::Idle,
        (SessionStatus::Idle | SessionStatus::Paused, SessionCommand::Start) => {
            SessionStatus::Running
        }
        (SessionStatus::Running, SessionCommand::Start) => SessionStatus::Running,
        (SessionStatus::Running, SessionCommand::Pause) => SessionStatus::Paused,
        (SessionStatus::Idle, SessionCommand::Pause) => SessionStatus::Idle,
        (SessionStatus::Paused, SessionCommand::Pause) => SessionStatus::Paused,
    }
}

/// Read-only view of a breathing session handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: SessionStatus,
    pub is_active: bool,
    pub current_phase: BreathingPhase,
    pub elapsed_in_phase_ms: u64,
    pub remaining_in_phase_ms: u64,
    pub completed_cycles: u64,
    pub animation_target: f32,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Set once the owning screen has been torn down; later commands are ignored.
    pub torn_down: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: SessionStatus::Idle,
            is_active: false,
            current_phase: BreathingPhase::Inhale,
            elapsed_in_phase_ms: 0,
            remaining_in_phase_ms: 0,
            completed_cycles: 0,
            animation_target: REST_SCALE,
            session_id: None,
            started_at: None,
            torn_down: false,
        }
    }
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.status == SessionStatus::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table_is_total() {
        use SessionCommand::*;
        use SessionStatus::*;

        let table = [
            (Idle, Start, Running),
            (Idle, Pause, Idle),
            (Idle, Reset, Idle),
            (Running, Start, Running),
            (Running, Pause, Paused),
            (Running, Reset, Idle),
            (Paused, Start, Running),
            (Paused, Pause, Paused),
            (Paused, Reset, Idle),
        ];

        for (status, command, expected) in table {
            assert_eq!(transition(status, command), expected, "{status:?} + {command:?}");
        }
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let json = serde_json::to_value(SessionState::default()).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["currentPhase"], "inhale");
        assert_eq!(json["isActive"], false);
        assert_eq!(json["completedCycles"], 0);
        assert_eq!(json["tornDown"], false);
    }
}
