//! Drag samples and the sampler that produces them from raw pointer input.

use tutorswipe_ui_graphics::Point;
use web_time::Instant;

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::velocity_tracker::VelocityTracker;

/// Cumulative translation since gesture start plus the instantaneous
/// velocity, in pixels and pixels per millisecond.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    pub vx: f32,
    pub vy: f32,
}

impl GestureSample {
    pub const ZERO: GestureSample = GestureSample {
        dx: 0.0,
        dy: 0.0,
        vx: 0.0,
        vy: 0.0,
    };

    pub const fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self { dx, dy, vx, vy }
    }

    /// A sample with translation only.
    pub const fn at(dx: f32, dy: f32) -> Self {
        Self::new(dx, dy, 0.0, 0.0)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.dx, self.dy)
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }

    /// The sample itself, or [`GestureSample::ZERO`] when any component is
    /// NaN or infinite.
    pub fn sanitized(self) -> Self {
        if self.is_finite() {
            self
        } else {
            Self::ZERO
        }
    }
}

/// Turns a stream of absolute pointer positions into [`GestureSample`]s.
pub struct GestureSampler {
    origin: Option<Point>,
    epoch: Instant,
    tracker: VelocityTracker,
    last: GestureSample,
}

impl Default for GestureSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSampler {
    pub fn new() -> Self {
        Self {
            origin: None,
            epoch: Instant::now(),
            tracker: VelocityTracker::new(),
            last: GestureSample::ZERO,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Starts a gesture at `position`, timestamps relative to now.
    pub fn begin(&mut self, position: Point) {
        self.epoch = Instant::now();
        self.begin_at(position, 0);
    }

    /// Starts a gesture at `position` with an explicit timestamp.
    pub fn begin_at(&mut self, position: Point, time_ms: i64) {
        self.tracker.reset();
        self.tracker.add_position(time_ms, position);
        self.origin = Some(position);
        self.last = GestureSample::ZERO;
    }

    /// Records `position`, timestamped against the `begin` call.
    pub fn push(&mut self, position: Point) -> GestureSample {
        let elapsed = self.epoch.elapsed().as_millis();
        self.push_at(position, i64::try_from(elapsed).unwrap_or(i64::MAX))
    }

    /// Records `position` at `time_ms`. Before `begin`, the first position
    /// becomes the origin.
    pub fn push_at(&mut self, position: Point, time_ms: i64) -> GestureSample {
        if !position.is_finite() {
            log::warn!("dropping non-finite pointer position {position:?}");
            return self.last;
        }
        let origin = *self.origin.get_or_insert(position);
        self.tracker.add_position(time_ms, position);
        let velocity = self.tracker.velocity_with_max(MAX_FLING_VELOCITY) * (1.0 / 1000.0);
        let translation = position - origin;
        self.last = GestureSample::new(translation.x, translation.y, velocity.x, velocity.y);
        self.last
    }

    /// Most recent sample of the current gesture.
    pub fn last(&self) -> GestureSample {
        self.last
    }

    /// Ends the gesture and returns its final sample.
    pub fn finish(&mut self) -> GestureSample {
        self.origin = None;
        self.tracker.reset();
        std::mem::take(&mut self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_samples_become_zero() {
        assert_eq!(
            GestureSample::new(f32::NAN, 3.0, 0.1, 0.0).sanitized(),
            GestureSample::ZERO
        );
        assert_eq!(
            GestureSample::new(1.0, 2.0, f32::INFINITY, 0.0).sanitized(),
            GestureSample::ZERO
        );
        let clean = GestureSample::new(1.0, 2.0, 0.3, -0.1);
        assert_eq!(clean.sanitized(), clean);
    }

    #[test]
    fn sampler_reports_translation_from_origin() {
        let mut sampler = GestureSampler::new();
        sampler.begin_at(Point::new(100.0, 200.0), 0);
        let sample = sampler.push_at(Point::new(130.0, 190.0), 16);
        assert_eq!(sample.dx, 30.0);
        assert_eq!(sample.dy, -10.0);
        assert!(sampler.is_tracking());
    }

    #[test]
    fn sampler_velocity_is_in_pixels_per_millisecond() {
        let mut sampler = GestureSampler::new();
        sampler.begin_at(Point::ZERO, 0);
        let mut sample = GestureSample::ZERO;
        for step in 1..=4 {
            sample = sampler.push_at(Point::new(step as f32 * 10.0, 0.0), step * 10);
        }
        // 10px every 10ms.
        assert!((sample.vx - 1.0).abs() < 0.05, "vx = {}", sample.vx);
        assert_eq!(sample.vy, 0.0);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut sampler = GestureSampler::new();
        sampler.begin_at(Point::ZERO, 0);
        let good = sampler.push_at(Point::new(12.0, 0.0), 10);
        let after_bad = sampler.push_at(Point::new(f32::NAN, 0.0), 20);
        assert_eq!(after_bad, good);
    }

    #[test]
    fn finish_clears_tracking() {
        let mut sampler = GestureSampler::new();
        sampler.begin_at(Point::ZERO, 0);
        sampler.push_at(Point::new(50.0, 0.0), 10);
        let last = sampler.finish();
        assert_eq!(last.dx, 50.0);
        assert!(!sampler.is_tracking());
        assert_eq!(sampler.last(), GestureSample::ZERO);
    }
}
