//! Converts variable frame times into a fixed simulation tick cadence.

use std::time::Duration;

use anyhow::{ensure, Result};

/// Accumulates elapsed frame time and reports how many ticks are due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TickPacer {
    interval: Duration,
    accumulator: Duration,
}

impl TickPacer {
    /// Creates a pacer firing `ticks_per_second` ticks every second.
    pub(crate) fn new(ticks_per_second: f32) -> Result<Self> {
        ensure!(
            ticks_per_second.is_finite() && ticks_per_second > 0.0,
            "tick rate must be a positive number (received {ticks_per_second})"
        );
        let interval = Duration::from_secs_f64(f64::from(ticks_per_second).recip());
        ensure!(!interval.is_zero(), "tick rate {ticks_per_second} is too high");

        Ok(Self {
            interval,
            accumulator: Duration::ZERO,
        })
    }

    /// Time between two ticks.
    #[cfg(test)]
    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds one frame's worth of time and returns the number of ticks due.
    pub(crate) fn advance(&mut self, dt: Duration) -> usize {
        self.accumulator = self.accumulator.saturating_add(dt);

        let mut ticks = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        ticks
    }
}
