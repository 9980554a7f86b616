//! Services the ripple field borrows from its host engine.

use rand::Rng;
use std::cell::Cell;
use std::time::Instant;

/// Monotonic seconds-since-start clock, read once per sample.
pub trait TimeSource {
    fn seconds(&self) -> f32;
}

/// Uniform integer generator over an inclusive range.
pub trait RandomSource {
    fn random_long(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: Rng> RandomSource for R {
    fn random_long(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Wall clock measured from construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock that only moves when told to. Used for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f32>,
}

impl ManualClock {
    pub fn new(now: f32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: f32) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f32) {
        self.now.set(self.now.get() + dt);
    }
}

impl TimeSource for ManualClock {
    fn seconds(&self) -> f32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn rng_draws_stay_in_inclusive_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        for _ in 0..1000 {
            let v = rng.random_long(0, 0x3ff);
            assert!((0..=0x3ff).contains(&v));
        }
        assert_eq!(rng.random_long(5, 5), 5);
    }

    #[test]
    fn manual_clock_moves_only_on_request() {
        let clock = ManualClock::new(2.0);
        assert_eq!(clock.seconds(), 2.0);
        clock.advance(0.5);
        assert_eq!(clock.seconds(), 2.5);
        clock.set(1.0);
        assert_eq!(clock.seconds(), 1.0);
    }
}
