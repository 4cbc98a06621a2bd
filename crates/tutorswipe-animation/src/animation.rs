//! Frame-driven animations for tutorswipe.
//!
//! Provides time-based tweens with easing curves and spring physics, both
//! advanced by the runtime's [`FrameClock`]. Completion is reported through
//! a one-shot callback and through the [`AnimationFinished`] future.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use smallvec::SmallVec;
use tutorswipe_core::{FrameCallbackRegistration, FrameClock};
use tutorswipe_ui_graphics::Point;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(self.x.lerp(&target.x, fraction), self.y.lerp(&target.y, fraction))
    }
}

/// Values an [`Animatable`] can drive.
///
/// Springs integrate a scalar progress from start (0.0) to target (1.0), so
/// any interpolatable value only has to say how far apart two values are.
pub trait AnimationVector: Lerp + Clone {
    fn distance_to(&self, other: &Self) -> f32;
}

impl AnimationVector for f32 {
    fn distance_to(&self, other: &Self) -> f32 {
        (other - self).abs()
    }
}

impl AnimationVector for Point {
    fn distance_to(&self, other: &Self) -> f32 {
        (*other - *self).distance()
    }
}

/// Easing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
}

impl Easing {
    /// Map a linear fraction in [0, 1] onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier([0.42, 0.0, 1.0, 1.0], fraction),
            Easing::EaseOut => cubic_bezier([0.0, 0.0, 0.58, 1.0], fraction),
            Easing::EaseInOut => cubic_bezier([0.42, 0.0, 0.58, 1.0], fraction),
            Easing::FastOutSlowIn => cubic_bezier([0.4, 0.0, 0.2, 1.0], fraction),
        }
    }
}

/// Evaluate a CSS-style cubic bezier `(x1, y1, x2, y2)` at x = `fraction`.
fn cubic_bezier([x1, y1, x2, y2]: [f32; 4], fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let coefficients = |p1: f32, p2: f32| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        (1.0 - c - b, b, c)
    };
    let (ax, bx, cx) = coefficients(x1, x2);
    let (ay, by, cy) = coefficients(y1, y2);
    let sample = |(a, b, c): (f32, f32, f32), t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson first, bisection when the slope flattens out.
    let mut t = fraction;
    for _ in 0..8 {
        let error = sample((ax, bx, cx), t) - fraction;
        if error.abs() < 1e-6 {
            return sample((ay, by, cy), t);
        }
        let d = slope(t);
        if d.abs() < 1e-6 {
            break;
        }
        t = (t - error / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..20 {
        let x = sample((ax, bx, cx), t);
        if (x - fraction).abs() < 1e-6 {
            break;
        }
        if x > fraction {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }
    sample((ay, by, cy), t)
}

/// Fixed-duration animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::tween(300, Easing::EaseInOut)
    }
}

/// Damped harmonic spring, unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = sluggish.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Rest thresholds, in progress units (start = 0, target = 1).
    pub velocity_threshold: f32,
    pub position_threshold: f32,
    /// Stop at the first crossing of the target instead of oscillating.
    pub overshoot_clamping: bool,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
            overshoot_clamping: false,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Build a spring from an absolute damping coefficient, the
    /// `{damping, stiffness}` pair mobile animation libraries expose.
    pub fn from_damping(damping: f32, stiffness: f32) -> Self {
        let stiffness = stiffness.max(f32::EPSILON);
        Self {
            damping_ratio: damping / (2.0 * stiffness.sqrt()),
            stiffness,
            ..Self::default_spring()
        }
    }

    /// Build a spring from Origami `tension`/`friction` values.
    pub fn from_origami(tension: f32, friction: f32) -> Self {
        let stiffness = (tension - 30.0) * 3.62 + 194.0;
        let damping = (friction - 8.0) * 3.0 + 25.0;
        Self::from_damping(damping, stiffness)
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    Tween(TweenSpec),
    Spring(SpringSpec),
}

impl Default for AnimationKind {
    fn default() -> Self {
        AnimationKind::Tween(TweenSpec::default())
    }
}

/// Why an animation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// Reached its target.
    Finished,
    /// Replaced by another `animate_to` or a `snap_to`.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEndReason) + 'static>;

/// Frame substep for spring integration.
const SPRING_TIMESTEP_SECONDS: f32 = 0.016;

/// Animated value holder.
///
/// Cloning yields another handle to the same value.
pub struct Animatable<T: AnimationVector + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: AnimationVector + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    kind: AnimationKind,
    progress: f32,
    velocity: f32,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    running: bool,
    run_id: u64,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
    waiters: SmallVec<[Waker; 2]>,
}

impl<T: AnimationVector + 'static> AnimatableInner<T> {
    /// Stops the current run and hands back whatever must be notified.
    fn stop(&mut self) -> (Option<EndCallback>, SmallVec<[Waker; 2]>) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.running = false;
        self.start = self.current.clone();
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.progress = 0.0;
        self.velocity = 0.0;
        (self.on_end.take(), std::mem::take(&mut self.waiters))
    }

    fn advance_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let previous = self.last_frame_nanos.replace(frame_time_nanos);
        let Some(previous) = previous else {
            return false;
        };
        let mut remaining = frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0;
        let damping = spec.damping();

        while remaining > 0.0 {
            let step = SPRING_TIMESTEP_SECONDS.min(remaining);
            let displacement = self.progress - 1.0;
            let force = -spec.stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.progress += self.velocity * step;
            remaining -= step;

            if spec.overshoot_clamping && self.progress >= 1.0 {
                self.progress = 1.0;
                self.velocity = 0.0;
                return true;
            }
        }

        self.current = self.start.lerp(&self.target, self.progress);
        self.velocity.abs() < spec.velocity_threshold
            && (self.progress - 1.0).abs() < spec.position_threshold
    }

    fn advance_tween(&mut self, spec: TweenSpec, frame_time_nanos: u64) -> bool {
        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start);
        let delay = spec.delay_millis * 1_000_000;
        if elapsed < delay {
            return false;
        }
        let duration = (spec.duration_millis * 1_000_000).max(1);
        let linear = ((elapsed - delay) as f32 / duration as f32).clamp(0.0, 1.0);
        self.progress = spec.easing.transform(linear);
        self.current = self.start.lerp(&self.target, self.progress);
        linear >= 1.0
    }
}

impl<T: AnimationVector + 'static> Animatable<T> {
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            kind: AnimationKind::default(),
            progress: 0.0,
            velocity: 0.0,
            start_time_nanos: None,
            last_frame_nanos: None,
            running: false,
            run_id: 0,
            registration: None,
            on_end: None,
            waiters: SmallVec::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn kind(&self) -> AnimationKind {
        self.inner.borrow().kind
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Animate from the current value to `target`. `on_end` runs exactly
    /// once, when this run finishes or is interrupted.
    pub fn animate_to(
        &self,
        target: T,
        kind: AnimationKind,
        on_end: impl FnOnce(AnimationEndReason) + 'static,
    ) {
        let (previous_end, previous_waiters) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.stop();
            inner.target = target;
            inner.kind = kind;
            inner.running = true;
            inner.run_id += 1;
            inner.on_end = Some(Box::new(on_end));
            interrupted
        };
        notify(previous_end, previous_waiters, AnimationEndReason::Interrupted);
        Self::schedule_frame(&self.inner);
    }

    /// Jump to `value`, interrupting any running animation.
    pub fn snap_to(&self, value: T) {
        let (previous_end, previous_waiters) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.stop();
            inner.current = value.clone();
            inner.start = value.clone();
            inner.target = value;
            interrupted
        };
        notify(previous_end, previous_waiters, AnimationEndReason::Interrupted);
    }

    /// Future that resolves once the run active at call time is over. It is
    /// immediately ready when nothing is running.
    pub fn finished(&self) -> AnimationFinished<T> {
        let run_id = self.inner.borrow().run_id;
        AnimationFinished {
            inner: Rc::clone(&self.inner),
            run_id,
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let completed = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let degenerate = inner.start.distance_to(&inner.target) <= f32::EPSILON;
            let done = degenerate
                || match inner.kind {
                    AnimationKind::Tween(spec) => inner.advance_tween(spec, frame_time_nanos),
                    AnimationKind::Spring(spec) => inner.advance_spring(spec, frame_time_nanos),
                };

            if done {
                inner.current = inner.target.clone();
                Some(inner.stop())
            } else {
                None
            }
        };

        match completed {
            Some((on_end, waiters)) => notify(on_end, waiters, AnimationEndReason::Finished),
            None => Self::schedule_frame(this),
        }
    }
}

fn notify(on_end: Option<EndCallback>, waiters: SmallVec<[Waker; 2]>, reason: AnimationEndReason) {
    if let Some(on_end) = on_end {
        on_end(reason);
    }
    for waker in waiters {
        waker.wake();
    }
}

impl<T: AnimationVector + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Resolves when the animation run it was created for stops.
pub struct AnimationFinished<T: AnimationVector + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
    run_id: u64,
}

impl<T: AnimationVector + 'static> Future for AnimationFinished<T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut inner = self.inner.borrow_mut();
        if !inner.running || inner.run_id != self.run_id {
            return Poll::Ready(());
        }
        if !inner.waiters.iter().any(|w| w.will_wake(cx.waker())) {
            inner.waiters.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
