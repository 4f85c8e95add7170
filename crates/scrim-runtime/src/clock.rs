//! Fixed-timestep pacing for hosts driving the match from a real-time
//! render loop
//!
//! The clock accumulates frame time (measured or injected) and hands it
//! back as whole simulation steps of a constant size, so the match
//! advances identically whatever the host's frame rate.

use std::time::Instant;

/// Frame deltas above this are truncated so a stall (debugger pause,
/// window drag) cannot queue an unbounded burst of catch-up steps.
const MAX_FRAME_MS: f32 = 250.0;

/// Turns irregular frame deltas into fixed-size simulation steps.
#[derive(Debug, Clone)]
pub struct GameClock {
    fixed_step_ms: f32,
    accumulator: f32,
    total_ms: f64,
    last_instant: Option<Instant>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::sixty_hz()
    }
}

impl GameClock {
    pub fn new(fixed_step_ms: f32) -> Self {
        Self {
            fixed_step_ms: fixed_step_ms.max(f32::EPSILON),
            accumulator: 0.0,
            total_ms: 0.0,
            last_instant: None,
        }
    }

    /// The conventional 60 steps per second.
    pub fn sixty_hz() -> Self {
        Self::new(1000.0 / 60.0)
    }

    pub fn fixed_step_ms(&self) -> f32 {
        self.fixed_step_ms
    }

    /// Total accumulated time in milliseconds, including the fraction
    /// not yet consumed as steps.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Measure the wall-clock delta since the previous call and feed it
    /// into the accumulator. The first call establishes the baseline
    /// and yields zero.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = match self.last_instant {
            Some(prev) => now.duration_since(prev).as_secs_f32() * 1000.0,
            None => 0.0,
        };
        self.last_instant = Some(now);
        self.accumulate(delta);
        delta
    }

    /// Feed an externally measured frame delta (ms) into the
    /// accumulator.
    pub fn accumulate(&mut self, delta_ms: f32) {
        let delta = delta_ms.clamp(0.0, MAX_FRAME_MS);
        self.total_ms += delta as f64;
        self.accumulator += delta;
    }

    /// Take one whole fixed step out of the accumulator, if one is
    /// available. Call in a loop to drain a frame.
    pub fn try_consume_step(&mut self) -> Option<f32> {
        if self.accumulator >= self.fixed_step_ms {
            self.accumulator -= self.fixed_step_ms;
            Some(self.fixed_step_ms)
        } else {
            None
        }
    }

    /// Fractional progress toward the next step, for render
    /// interpolation between simulation states.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_time_drains_as_whole_steps() {
        let mut clock = GameClock::new(10.0);
        clock.accumulate(35.0);

        let mut steps = 0;
        while let Some(dt) = clock.try_consume_step() {
            assert_eq!(dt, 10.0);
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert!((clock.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stall_is_truncated() {
        let mut clock = GameClock::new(10.0);
        clock.accumulate(10_000.0);

        let mut steps = 0;
        while clock.try_consume_step().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 25, "a stalled frame caps at {MAX_FRAME_MS}ms");
    }

    #[test]
    fn first_tick_only_sets_the_baseline() {
        let mut clock = GameClock::sixty_hz();
        assert_eq!(clock.tick(), 0.0);
        assert!(clock.try_consume_step().is_none());
    }

    #[test]
    fn total_time_includes_the_unconsumed_fraction() {
        let mut clock = GameClock::new(10.0);
        clock.accumulate(14.0);
        clock.try_consume_step();
        assert_eq!(clock.total_ms(), 14.0);
    }

    #[test]
    fn negative_deltas_are_ignored() {
        let mut clock = GameClock::new(10.0);
        clock.accumulate(-50.0);
        assert_eq!(clock.total_ms(), 0.0);
        assert!(clock.try_consume_step().is_none());
    }
}
