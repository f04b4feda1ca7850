//! Fixed-step timing for the simulation loop.

use std::time::{Duration, Instant};

/// Upper bound on the steps a single frame may queue. Frames slower than this drop time
/// instead of spiralling.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Accumulates frame time and hands it out in fixed-size steps.
#[derive(Debug)]
pub struct FixedStep {
    /// Size of one simulation step.
    step: Duration,
    /// Time banked but not yet consumed by a step.
    accumulator: Duration,
    /// Simulated time consumed so far.
    elapsed: Duration,
    /// Number of steps handed out.
    step_count: u64,
    /// Wall-clock time of the previous `begin_frame`.
    last_frame: Option<Instant>,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::from_rate(60.0)
    }
}

impl FixedStep {
    /// Create a stepper running at `hz` steps per second.
    pub fn from_rate(hz: f64) -> Self {
        Self {
            step: Duration::from_secs_f64(1.0 / hz.max(1.0)),
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            step_count: 0,
            last_frame: None,
        }
    }

    /// Bank the wall-clock time since the last call.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame.replace(now) {
            self.accumulate(now - last);
        }
    }

    /// Bank an explicit amount of time (headless or replayed runs).
    pub fn accumulate(&mut self, delta: Duration) {
        let cap = self.step * MAX_STEPS_PER_FRAME;
        self.accumulator += delta;
        if self.accumulator > cap {
            log::debug!(
                "Dropping {:?} of simulation time (frame took {:?})",
                self.accumulator - cap,
                delta
            );
            self.accumulator = cap;
        }
    }

    /// Check if a step should run and consume its time.
    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            self.elapsed += self.step;
            self.step_count += 1;
            true
        } else {
            false
        }
    }

    /// Step size.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Step size in seconds.
    pub fn step_seconds(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Simulated time consumed so far, in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of steps handed out so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_hands_out_whole_steps() {
        let mut clock = FixedStep::from_rate(10.0);
        clock.accumulate(Duration::from_millis(250));
        assert!(clock.should_step());
        assert!(clock.should_step());
        assert!(!clock.should_step());
        assert_eq!(clock.step_count(), 2);
        assert!((clock.elapsed_seconds() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut clock = FixedStep::from_rate(10.0);
        clock.accumulate(Duration::from_secs(10));
        let mut steps = 0;
        while clock.should_step() {
            steps += 1;
        }
        assert_eq!(steps, MAX_STEPS_PER_FRAME);
    }
}
