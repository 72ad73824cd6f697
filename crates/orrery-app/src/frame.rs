//! Wall-clock frame timing with stall clamping.
//!
//! The scene is a pure function of elapsed time, so the clock is the single
//! source of animation state. Long stalls (window drag, debugger pause) are
//! clamped so the system never lurches forward after one.

use std::time::Instant;
use tracing::warn;

/// A frame longer than this is clamped: animation slows instead of jumping.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// One measured frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTick {
    /// Clamped frame duration in seconds.
    pub dt: f32,
    /// Total clamped elapsed time since the clock started.
    pub elapsed: f32,
}

/// Accumulates clamped elapsed time across frames.
pub struct FrameClock {
    previous: Instant,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            elapsed: 0.0,
        }
    }

    /// Measure the time since the last tick and advance the clock.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous).as_secs_f64();
        self.previous = now;
        self.advance(frame_time)
    }

    /// Advance by an explicit frame time. Split out so timing behavior is
    /// testable without wall-clock dependence.
    fn advance(&mut self, frame_time: f64) -> FrameTick {
        let dt = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };
        self.elapsed += dt;
        FrameTick {
            dt: dt as f32,
            elapsed: self.elapsed as f32,
        }
    }

    /// Total clamped elapsed time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_accumulates_frame_times() {
        let mut clock = FrameClock::new();
        clock.advance(0.016);
        clock.advance(0.020);
        let tick = clock.advance(0.014);
        assert!((tick.elapsed - 0.050).abs() < 1e-6);
        assert!((tick.dt - 0.014).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let tick = clock.advance(3.0);
        assert!((tick.dt as f64 - MAX_FRAME_TIME).abs() < 1e-9);
        assert!((tick.elapsed as f64 - MAX_FRAME_TIME).abs() < 1e-9);
    }

    #[test]
    fn test_zero_frame_time() {
        let mut clock = FrameClock::new();
        let tick = clock.advance(0.0);
        assert_eq!(tick.dt, 0.0);
        assert_eq!(tick.elapsed, 0.0);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.300, 0.016, 0.033];
        let mut a = FrameClock::new();
        let mut b = FrameClock::new();
        for &ft in &frame_times {
            let ta = a.advance(ft);
            let tb = b.advance(ft);
            assert_eq!(ta.elapsed, tb.elapsed);
        }
    }
}
