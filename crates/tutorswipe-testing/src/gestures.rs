//! Scripted pointer input for a [`SwipeController`].

use tutorswipe_foundation::{GestureSample, GestureSampler, ReleaseOutcome, SwipeController};
use tutorswipe_ui_graphics::Point;

/// Move samples per scripted drag.
pub const DRAG_STEPS: usize = 8;

/// Interval between sampled pointer positions.
pub const SAMPLE_INTERVAL_MS: i64 = 8;

/// Starts a gesture and moves linearly to `(dx, dy)` at zero velocity.
/// Returns whether the controller accepted the start.
pub fn drag(controller: &SwipeController, dx: f32, dy: f32) -> bool {
    if !controller.gesture_start() {
        return false;
    }
    for step in 1..=DRAG_STEPS {
        let t = step as f32 / DRAG_STEPS as f32;
        controller.move_to(GestureSample::at(dx * t, dy * t));
    }
    true
}

/// Drag to `(dx, dy)` and let go with no velocity.
pub fn swipe(controller: &SwipeController, dx: f32, dy: f32) -> Option<ReleaseOutcome> {
    flick(controller, dx, dy, 0.0, 0.0)
}

/// Drag to `(dx, dy)`; the last sample carries `(vx, vy)` px/ms.
pub fn flick(
    controller: &SwipeController,
    dx: f32,
    dy: f32,
    vx: f32,
    vy: f32,
) -> Option<ReleaseOutcome> {
    if !drag(controller, dx, dy) {
        return None;
    }
    controller.move_to(GestureSample::new(dx, dy, vx, vy));
    controller.release()
}

/// Press, wobble a few pixels, release.
pub fn tap(controller: &SwipeController) -> Option<ReleaseOutcome> {
    if !controller.gesture_start() {
        return None;
    }
    controller.move_to(GestureSample::at(2.0, 1.0));
    controller.release()
}

/// Drives real pointer positions from `from` to `to` over `duration_ms`
/// through a [`GestureSampler`], so velocities come from the tracker.
pub fn pointer_swipe(
    controller: &SwipeController,
    from: Point,
    to: Point,
    duration_ms: i64,
) -> Option<ReleaseOutcome> {
    if !controller.gesture_start() {
        return None;
    }
    let mut sampler = GestureSampler::new();
    sampler.begin_at(from, 0);
    let steps = (duration_ms / SAMPLE_INTERVAL_MS).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        let position = from + (to - from) * t;
        controller.move_to(sampler.push_at(position, step * SAMPLE_INTERVAL_MS));
    }
    sampler.finish();
    controller.release()
}
