/// Countdown that keeps the resend action disabled.
///
/// Every `start` bumps the generation so ticks scheduled for an earlier
/// countdown can be told apart and dropped.
#[derive(Debug, Default, Clone)]
pub struct ResendTimer {
    remaining: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Stale generation or timer not running.
    Ignored,
    Counting(u32),
    Finished,
}

impl ResendTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the countdown at `seconds`, replacing any running one.
    pub fn start(&mut self, seconds: u32) -> u64 {
        self.generation += 1;
        self.remaining = seconds;
        self.generation
    }

    pub fn cancel(&mut self) {
        self.remaining = 0;
    }

    pub fn tick(&mut self, generation: u64) -> Tick {
        if generation != self.generation || self.remaining == 0 {
            return Tick::Ignored;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            Tick::Finished
        } else {
            Tick::Counting(self.remaining)
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_finished() {
        let mut timer = ResendTimer::new();
        let generation = timer.start(3);
        assert!(timer.is_active());
        assert_eq!(timer.tick(generation), Tick::Counting(2));
        assert_eq!(timer.tick(generation), Tick::Counting(1));
        assert_eq!(timer.tick(generation), Tick::Finished);
        assert!(!timer.is_active());
        assert_eq!(timer.tick(generation), Tick::Ignored);
    }

    #[test]
    fn restart_invalidates_old_ticks() {
        let mut timer = ResendTimer::new();
        let first = timer.start(5);
        timer.tick(first);
        let second = timer.start(5);
        assert_ne!(first, second);
        assert_eq!(timer.tick(first), Tick::Ignored);
        assert_eq!(timer.remaining(), 5);
        assert_eq!(timer.tick(second), Tick::Counting(4));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timer = ResendTimer::new();
        let generation = timer.start(30);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(timer.generation(), generation);
        assert_eq!(timer.tick(generation), Tick::Ignored);
    }
}
