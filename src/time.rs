//! Frame timing for driving emitters.
//!
//! Emitters take the frame time as an argument and never read a clock
//! themselves. [`FrameClock`] is a small helper for the loop that calls
//! them: it measures the real time between ticks, or hands out a fixed
//! step for deterministic playback, and can scale, pause and clamp it.
//!
//! # Example
//!
//! ```
//! use fx2d::prelude::*;
//!
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! let mut emitter = Emitter::builder().with_emission_rate(60.0).build().unwrap();
//!
//! for _ in 0..60 {
//!     emitter.update(clock.tick());
//! }
//! assert_eq!(clock.frame(), 60);
//! assert!((clock.elapsed() - 1.0).abs() < 1e-4);
//! ```

use std::time::Instant;

/// Supplies `dt` for each frame of an external loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Instant of the previous tick.
    last_tick: Instant,
    /// Fixed step in seconds, if any.
    fixed_delta: Option<f32>,
    /// Largest delta ever returned, to avoid huge bursts after a stall.
    max_delta: Option<f32>,
    /// Multiplier applied to every delta.
    time_scale: f32,
    paused: bool,
    delta_secs: f32,
    elapsed_secs: f32,
    frame_count: u64,
}

impl FrameClock {
    /// A clock measuring real time between ticks.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            fixed_delta: None,
            max_delta: None,
            time_scale: 1.0,
            paused: false,
            delta_secs: 0.0,
            elapsed_secs: 0.0,
            frame_count: 0,
        }
    }

    /// A clock that advances by exactly `step` seconds per tick.
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_delta: Some(step.max(0.0)),
            ..Self::new()
        }
    }

    /// Clamp every delta to at most `max` seconds.
    pub fn with_max_delta(mut self, max: f32) -> Self {
        self.max_delta = Some(max.max(0.0));
        self
    }

    /// Advance one frame and return its delta in seconds.
    ///
    /// Returns 0 while paused; paused time is never counted.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        self.delta_secs = if self.paused {
            0.0
        } else {
            let delta = self.fixed_delta.unwrap_or(raw) * self.time_scale;
            self.max_delta.map_or(delta, |max| delta.min(max))
        };
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Delta returned by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Sum of all deltas returned so far.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Speed multiplier; negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Switch between fixed-step (`Some`) and measured (`None`) deltas.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
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
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fixed_step() {
        let mut clock = FrameClock::fixed(0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_measured_delta() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert_eq!(clock.delta(), dt);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut clock = FrameClock::fixed(0.1);
        clock.tick();
        clock.pause();
        assert_eq!(clock.tick(), 0.0);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
        clock.toggle_pause();
        assert!(!clock.is_paused());
        assert_eq!(clock.tick(), 0.1);
    }

    #[test]
    fn test_time_scale_and_clamp() {
        let mut clock = FrameClock::fixed(0.1).with_max_delta(0.15);
        clock.set_time_scale(2.0);
        assert_eq!(clock.tick(), 0.15);
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn test_switch_to_measured() {
        let mut clock = FrameClock::fixed(5.0).with_max_delta(1.0);
        clock.set_fixed_delta(None);
        let dt = clock.tick();
        assert!(dt < 1.0);
    }
}
