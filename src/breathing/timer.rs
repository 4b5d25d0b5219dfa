/// Emitted once each time the timer crosses the end of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseComplete {
    /// Part of the tick that ran past the boundary. Belongs to the next phase.
    pub carry_ms: u64,
}

/// Tracks elapsed time inside the current phase.
///
/// The timer knows nothing about which phase it is timing; the owner
/// restarts it with the next phase's duration after every `PhaseComplete`.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimer {
    duration_ms: u64,
    elapsed_ms: u64,
    running: bool,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Continue from the preserved elapsed time.
    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Clears elapsed time and halts. Used when the owning session resets.
    pub fn clear(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Advance by `delta_ms`. Returns `Some` when this tick reaches the end of
    /// the phase; the timer then sits at zero and stays halted until the
    /// caller `start`s the next phase. A tick never crosses more than one
    /// boundary, whatever its size: the overshoot comes back as `carry_ms`.
    pub fn tick(&mut self, delta_ms: u64) -> Option<PhaseComplete> {
        if !self.running {
            return None;
        }

        let remaining = self.remaining_ms();
        if delta_ms < remaining {
            self.elapsed_ms += delta_ms;
            return None;
        }

        self.elapsed_ms = 0;
        self.running = false;
        Some(PhaseComplete {
            carry_ms: delta_ms - remaining,
        })
    }
}
