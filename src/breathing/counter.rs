/// Completed Inhale -> Hold -> Exhale traversals in the current session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleCounter {
    completed: u64,
}

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cycle_complete(&mut self) -> u64 {
        self.completed = self.completed.saturating_add(1);
        self.completed
    }

    pub fn count(&self) -> u64 {
        self.completed
    }

    pub fn reset(&mut self) {
        self.completed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_until_reset() {
        let mut counter = CycleCounter::new();
        assert_eq!(counter.on_cycle_complete(), 1);
        assert_eq!(counter.on_cycle_complete(), 2);
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
