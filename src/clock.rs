//! Tick sources.
//!
//! The simulation never reads the wall clock.  `SimClock` turns a tick count
//! into simulation milliseconds; `FrameClock` paces the real loop.

use std::time::{Duration, Instant};

use crate::constants::timing::TICK_RATE;

/// Deterministic tick counter.
#[derive(Clone, Debug)]
pub struct SimClock {
    rate: u32,
    ticks: u64,
}

impl SimClock {
    /// A zero rate is treated as 1 Hz.
    pub fn new(rate: u32) -> Self {
        Self {
            rate: rate.max(1),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulation time of the current tick, in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.ticks * 1000 / self.rate as u64
    }

    /// Step one tick and return the new simulation time.
    pub fn advance(&mut self) -> u64 {
        self.ticks += 1;
        self.now_ms()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

/// Wall-clock pacer for the interactive loop.
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(rate: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / rate.max(1),
            frame_start: Instant::now(),
        }
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the current frame's budget.
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.frame_start.elapsed())
    }

    /// Sleep out the rest of the frame.
    pub fn finish(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_ticks_is_one_second() {
        let mut clock = SimClock::default();
        let mut now = 0;
        for _ in 0..60 {
            now = clock.advance();
        }
        assert_eq!(now, 1000);
        assert_eq!(clock.ticks(), 60);
    }

    #[test]
    fn now_is_monotonic() {
        let mut clock = SimClock::new(60);
        let mut last = clock.now_ms();
        for _ in 0..500 {
            let now = clock.advance();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn zero_rate_does_not_divide_by_zero() {
        let mut clock = SimClock::new(0);
        assert_eq!(clock.advance(), 1000);
        assert_eq!(clock.advance(), 2000);
        assert!(FrameClock::new(0).remaining() <= Duration::from_secs(1));
    }

    #[test]
    fn frame_budget_never_exceeds_rate() {
        let mut clock = FrameClock::new(60);
        clock.begin();
        assert!(clock.remaining() <= Duration::from_secs(1) / 60);
    }
}
