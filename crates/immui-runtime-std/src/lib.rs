//! Standard runtime services backed by Rust's `std` library.
//!
//! Provides the [`Clock`] the app shell measures frame time with, and a
//! [`FrameTimer`] that turns clock readings into per-frame deltas.

use std::time::{Duration, Instant};

use immui_core::Clock;

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_seconds(&self, since: Self::Instant) -> f32 {
        since.elapsed().as_secs_f32()
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// Longest frame delta reported by [`FrameTimer::tick`], in seconds. Keeps
/// scroll animation from jumping after the window was suspended.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Measures the time between consecutive frames.
pub struct FrameTimer<C: Clock> {
    clock: C,
    last: Option<C::Instant>,
}

impl<C: Clock> FrameTimer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: None }
    }

    /// Seconds since the previous tick, clamped to [`MAX_FRAME_TIME`]. The
    /// first tick reports zero.
    pub fn tick(&mut self) -> f32 {
        let now = self.clock.now();
        let dt = match self.last {
            Some(last) => self.clock.elapsed_seconds(last).clamp(0.0, MAX_FRAME_TIME),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl Default for FrameTimer<StdClock> {
    fn default() -> Self {
        Self::new(StdClock)
    }
}
