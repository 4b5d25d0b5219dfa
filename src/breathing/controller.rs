use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::error::PatternError;

use super::{
    counter::CycleCounter,
    phase::PhaseDurations,
    sequencer::{PhaseChange, PhaseSequencer},
    state::{transition, SessionCommand, SessionState, SessionStatus},
    timer::{PhaseComplete, PhaseTimer},
};

pub type PhaseObserver = Box<dyn FnMut(&PhaseChange) + Send>;
pub type CycleObserver = Box<dyn FnMut(u64) + Send>;

/// Owns all session truth for one breathing exercise and exposes the
/// start / pause / reset commands to the UI layer.
///
/// Time only moves through [`SessionController::tick`]; the controller never
/// reads a clock for phase timing, so any timer source (a tokio interval, an
/// animation frame callback, a test loop) can drive it.
pub struct SessionController {
    durations: PhaseDurations,
    status: SessionStatus,
    timer: PhaseTimer,
    sequencer: PhaseSequencer,
    counter: CycleCounter,
    session_id: Option<String>,
    started_at: Option<chrono::DateTime<Utc>>,
    phase_observers: Vec<PhaseObserver>,
    cycle_observers: Vec<CycleObserver>,
    torn_down: bool,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

impl SessionController {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            status: SessionStatus::Idle,
            timer: PhaseTimer::new(),
            sequencer: PhaseSequencer::new(),
            counter: CycleCounter::new(),
            session_id: None,
            started_at: None,
            phase_observers: Vec::new(),
            cycle_observers: Vec::new(),
            torn_down: false,
        }
    }

    pub fn from_millis(inhale_ms: u64, hold_ms: u64, exhale_ms: u64) -> Result<Self, PatternError> {
        Ok(Self::new(PhaseDurations::new(inhale_ms, hold_ms, exhale_ms)?))
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn on_phase_change<F>(&mut self, observer: F)
    where
        F: FnMut(&PhaseChange) + Send + 'static,
    {
        self.phase_observers.push(Box::new(observer));
    }

    pub fn on_cycle_complete<F>(&mut self, observer: F)
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.cycle_observers.push(Box::new(observer));
    }

    /// Idle -> Running starts a fresh session, Paused -> Running resumes where
    /// the pause left off. Returns whether the status changed.
    pub fn start(&mut self) -> bool {
        if self.torn_down {
            debug!("Ignoring start on a torn down breathing session");
            return false;
        }

        let next = transition(self.status, SessionCommand::Start);
        match self.status {
            SessionStatus::Running => return false,
            SessionStatus::Idle => {
                let session_id = Uuid::new_v4().to_string();
                self.timer.start(self.durations.get(self.sequencer.current()));
                self.sequencer.enter_current();
                self.started_at = Some(Utc::now());
                info!("Breathing session {} started", session_id);
                self.session_id = Some(session_id);
            }
            SessionStatus::Paused => {
                self.timer.resume();
                info!(
                    "Breathing session {} resumed in {} at {}ms",
                    self.session_label(),
                    self.sequencer.current(),
                    self.timer.elapsed_ms()
                );
            }
        }

        self.status = next;
        true
    }

    /// Running -> Paused. Phase, elapsed time and animation target are frozen.
    pub fn pause(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }

        self.timer.stop();
        self.status = transition(self.status, SessionCommand::Pause);
        info!(
            "Breathing session {} paused in {} at {}ms",
            self.session_label(),
            self.sequencer.current(),
            self.timer.elapsed_ms()
        );
        true
    }

    /// Back to a canonical Idle session from any status.
    pub fn reset(&mut self) {
        if self.status != SessionStatus::Idle {
            info!(
                "Breathing session {} reset after {} cycles",
                self.session_label(),
                self.counter.count()
            );
        }

        self.timer.clear();
        self.sequencer.reset();
        self.counter.reset();
        self.session_id = None;
        self.started_at = None;
        self.status = transition(self.status, SessionCommand::Reset);
    }

    /// Feed `delta_ms` of elapsed time into the running session.
    ///
    /// Every phase boundary crossed produces exactly one [`PhaseChange`], in
    /// order, even when `delta_ms` spans several phases. Observers are invoked
    /// for each change before the next one is computed.
    pub fn tick(&mut self, delta_ms: u64) -> Vec<PhaseChange> {
        let mut changes = Vec::new();
        if self.torn_down || self.status != SessionStatus::Running {
            return changes;
        }

        let mut pending_ms = delta_ms;
        while let Some(PhaseComplete { carry_ms }) = self.timer.tick(pending_ms) {
            let change = self.sequencer.step();
            self.timer.start(self.durations.get(change.to));

            debug!(
                "Breathing phase {} -> {} (target {:.2})",
                change.from, change.to, change.animation_target
            );
            for observer in self.phase_observers.iter_mut() {
                observer(&change);
            }

            if change.cycle_completed {
                let completed = self.counter.on_cycle_complete();
                debug!("Breathing cycle {} completed", completed);
                for observer in self.cycle_observers.iter_mut() {
                    observer(completed);
                }
            }

            changes.push(change);
            pending_ms = carry_ms;
        }

        changes
    }

    /// Release the session for good: the timer halts, observers are dropped
    /// and later ticks or starts do nothing. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        self.timer.stop();
        self.status = transition(self.status, SessionCommand::Pause);
        self.phase_observers.clear();
        self.cycle_observers.clear();
        self.torn_down = true;
        debug!("Breathing session {} torn down", self.session_label());
    }

    pub fn state(&self) -> SessionState {
        let phase = self.sequencer.current();
        let elapsed = self.timer.elapsed_ms();

        SessionState {
            status: self.status,
            is_active: self.status == SessionStatus::Running,
            current_phase: phase,
            elapsed_in_phase_ms: elapsed,
            remaining_in_phase_ms: self.durations.get(phase).saturating_sub(elapsed),
            completed_cycles: self.counter.count(),
            animation_target: self.sequencer.animation_target(),
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            torn_down: self.torn_down,
        }
    }

    fn session_label(&self) -> &str {
        self.session_id.as_deref().unwrap_or("<none>")
    }
}
