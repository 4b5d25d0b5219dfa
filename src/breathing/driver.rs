use std::{sync::Arc, time::Duration};

use log::{debug, info};
use serde::Serialize;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::error::PatternError;

use super::{
    controller::SessionController,
    sequencer::PhaseChange,
    state::{SessionState, SessionStatus},
};

/// How the ticker drives a session. Both values are at least 1ms; a zero
/// interval cannot be scheduled and a zero delta would never move the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    interval: Duration,
    delta_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            delta_ms: 1_000,
        }
    }
}

impl TickConfig {
    /// `interval` is the wall-clock spacing between ticks, `delta_ms` the
    /// session time credited per tick.
    pub fn new(interval: Duration, delta_ms: u64) -> Result<Self, PatternError> {
        if interval.is_zero() || delta_ms == 0 {
            return Err(PatternError::ZeroTick);
        }
        Ok(Self { interval, delta_ms })
    }

    /// Real-time ticking: each tick credits exactly its own interval.
    pub fn every(interval: Duration) -> Result<Self, PatternError> {
        Self::new(interval, interval.as_millis() as u64)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub cycle_remaining_ms: u64,
}

/// Aborts the ticker task when dropped, so the interval never outlives the
/// session that owns it.
struct TickerGuard(JoinHandle<()>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Async handle that drives a [`SessionController`] from a tokio interval.
///
/// Clones share the same controller and ticker. The ticker is released on
/// pause, reset, teardown, or when the last clone is dropped.
#[derive(Clone)]
pub struct BreathingSession {
    controller: Arc<Mutex<SessionController>>,
    ticker: Arc<Mutex<Option<TickerGuard>>>,
    tick: TickConfig,
}

impl BreathingSession {
    pub fn new(controller: SessionController, tick: TickConfig) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            ticker: Arc::new(Mutex::new(None)),
            tick,
        }
    }

    pub async fn get_state(&self) -> SessionState {
        self.controller.lock().await.state()
    }

    pub async fn get_snapshot(&self) -> SessionSnapshot {
        let guard = self.controller.lock().await;
        let state = guard.state();
        let durations = guard.durations();
        let into_cycle = durations
            .offset_of(state.current_phase)
            .saturating_add(state.elapsed_in_phase_ms);

        SessionSnapshot {
            cycle_remaining_ms: durations.cycle_ms().saturating_sub(into_cycle),
            state,
        }
    }

    pub async fn on_phase_change<F>(&self, observer: F)
    where
        F: FnMut(&PhaseChange) + Send + 'static,
    {
        self.controller.lock().await.on_phase_change(observer);
    }

    pub async fn on_cycle_complete<F>(&self, observer: F)
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.controller.lock().await.on_cycle_complete(observer);
    }

    pub async fn start(&self) -> SessionState {
        let (changed, state) = {
            let mut guard = self.controller.lock().await;
            let changed = guard.start();
            (changed, guard.state())
        };

        if changed && state.status == SessionStatus::Running {
            self.spawn_ticker().await;
        }

        state
    }

    pub async fn pause(&self) -> SessionState {
        let state = {
            let mut guard = self.controller.lock().await;
            guard.pause();
            guard.state()
        };
        self.cancel_ticker().await;
        state
    }

    pub async fn reset(&self) -> SessionState {
        self.cancel_ticker().await;
        let mut guard = self.controller.lock().await;
        guard.reset();
        guard.state()
    }

    /// Stop ticking and release the controller. Idempotent.
    pub async fn teardown(&self) {
        self.cancel_ticker().await;
        self.controller.lock().await.teardown();
    }

    pub async fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map(|guard| !guard.0.is_finished())
            .unwrap_or(false)
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        // Dropping the old guard aborts its task.
        ticker_guard.take();

        let controller = self.controller.clone();
        let tick = self.tick;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + tick.interval, tick.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;

                let mut guard = controller.lock().await;
                if !guard.is_running() {
                    debug!("Breathing ticker exiting; session no longer running");
                    break;
                }
                guard.tick(tick.delta_ms);
            }
        });

        info!(
            "Breathing ticker started ({}ms interval, {}ms per tick)",
            self.tick.interval.as_millis(),
            self.tick.delta_ms
        );
        *ticker_guard = Some(TickerGuard(handle));
    }

    async fn cancel_ticker(&self) {
        if self.ticker.lock().await.take().is_some() {
            debug!("Breathing ticker cancelled");
        }
    }
}
