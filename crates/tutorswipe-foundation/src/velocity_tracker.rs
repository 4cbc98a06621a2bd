//! Pointer velocity estimation.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! recent movement would impart, which is robust against the uneven sample
//! spacing touch screens produce.

use tutorswipe_ui_graphics::Point;

/// Samples kept per axis.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct TimedPosition {
    time_ms: i64,
    position: f32,
}

/// Velocity estimator for one axis of absolute positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<TimedPosition>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(TimedPosition { time_ms, position });
    }

    /// Velocity in units per second; 0.0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous_time = newest.time_ms;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;
            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity in units per second clamped to `±max_velocity`.
    pub fn velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `positions[0]`/`times[0]` are the newest sample; times are non-positive
/// ages in milliseconds. Returns units per millisecond.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// E = ½mv² with m = 1.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis velocity estimator for pointer positions.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_position(time_ms, position.x);
        self.y.add_position(time_ms, position.y);
    }

    /// Velocity in pixels per second, each axis clamped to `±max_velocity`.
    pub fn velocity_with_max(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.velocity_with_max(max_velocity),
            self.y.velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
