use crate::config::RippleConfig;

/// Simulated time of a ripple field and the time of its last disturbance.
///
/// Starts unprimed: the first advance always takes the initialization path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationClock {
    time: f32,
    oldtime: f32,
    primed: bool,
}

/// Result of advancing the clock for one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advance {
    /// Seconds the simulation moved forward; zero when the sample was suppressed.
    pub delta: f32,
    /// The clock was (re)initialized by this advance.
    pub reset: bool,
}

impl SimulationClock {
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn oldtime(&self) -> f32 {
        self.oldtime
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Move simulated time towards `now`.
    ///
    /// A backwards (or NaN) reading reinitializes the clock with a synthetic
    /// `initial_advance` step. Forward steps shorter than `min_advance` collapse to zero.
    pub fn advance(&mut self, now: f32, config: &RippleConfig) -> Advance {
        let mut delta = now - self.time;
        let mut reset = false;
        if !self.primed || !(delta >= 0.0) {
            delta = self.reset(now, config.initial_advance);
            reset = true;
        } else if delta < config.min_advance {
            delta = 0.0;
        }
        self.time += delta;
        Advance { delta, reset }
    }

    fn reset(&mut self, now: f32, initial_advance: f32) -> f32 {
        self.time = now - initial_advance;
        self.oldtime = self.time;
        self.primed = true;
        log::debug!("ripple clock initialized at t={now:.3}");
        initial_advance
    }

    /// Seconds since the last disturbance.
    pub fn since_disturbance(&self) -> f32 {
        self.time - self.oldtime
    }

    pub fn mark_disturbance(&mut self) {
        self.oldtime = self.time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_uses_initial_step() {
        let config = RippleConfig::default();
        let mut clock = SimulationClock::default();
        let adv = clock.advance(100.0, &config);
        assert!(adv.reset);
        assert_eq!(adv.delta, config.initial_advance);
        assert!((clock.time() - 100.0).abs() < 1e-4);
        assert!(clock.time() >= clock.oldtime());
    }

    #[test]
    fn short_steps_are_suppressed() {
        let config = RippleConfig::default();
        let mut clock = SimulationClock::default();
        clock.advance(1.0, &config);
        let before = clock.time();
        let adv = clock.advance(1.03, &config);
        assert_eq!(adv.delta, 0.0);
        assert!(!adv.reset);
        assert_eq!(clock.time(), before);
    }

    #[test]
    fn backwards_time_reinitializes() {
        let config = RippleConfig::default();
        let mut clock = SimulationClock::default();
        clock.advance(50.0, &config);
        clock.advance(51.0, &config);
        let adv = clock.advance(2.0, &config);
        assert!(adv.reset);
        assert_eq!(adv.delta, config.initial_advance);
        assert!((clock.time() - 2.0).abs() < 1e-4);
        assert_eq!(clock.since_disturbance(), clock.time() - clock.oldtime());
    }

    #[test]
    fn nan_time_reinitializes() {
        let config = RippleConfig::default();
        let mut clock = SimulationClock::default();
        clock.advance(5.0, &config);
        let adv = clock.advance(f32::NAN, &config);
        assert!(adv.reset);
    }
}
