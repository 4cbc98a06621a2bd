//! Gesture lifecycle for one swipeable surface.
//!
//! `Idle -> Dragging -> {Committing -> Idle, SnappingBack -> Idle}`. The
//! controller owns the visual offset as an [`Animatable`], so fly-off and
//! snap-back are advanced by the frame clock and complete asynchronously.
//!
//! User callbacks (actions, tap, commit guard, haptics) are never invoked
//! while the controller state is borrowed; they may call back into the
//! controller.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tutorswipe_animation::{
    Animatable, AnimationEndReason, AnimationFinished, AnimationKind, Easing, TweenSpec,
};
use tutorswipe_core::FrameClock;
use tutorswipe_ui_graphics::{Point, Size};

use super::commit::{decide_release, ReleaseOutcome};
use super::config::{CommitMotion, SwipeConfig};
use super::direction::{classify, Direction, DirectionFeedback};
use super::haptics::{HapticFeedback, HapticPulse, NoHaptics};
use super::indicator;
use super::sample::GestureSample;

/// Failure reported by a swipe action. The controller logs it and still
/// returns to rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Busy,
    Failed { reason: String },
}

impl ActionError {
    pub fn failed(reason: impl Into<String>) -> Self {
        ActionError::Failed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Busy => write!(f, "action already in progress"),
            ActionError::Failed { reason } => write!(f, "action failed: {reason}"),
        }
    }
}

impl std::error::Error for ActionError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    Dragging,
    Committing,
    SnappingBack,
}

/// Snapshot of a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeState {
    pub phase: SwipePhase,
    pub current_direction: Option<Direction>,
    pub offset: Point,
}

type SwipeAction = Rc<dyn Fn(Direction) -> Result<(), ActionError>>;
type TapAction = Rc<dyn Fn()>;
type CommitGuard = Rc<dyn Fn() -> bool>;

struct ControllerInner {
    config: SwipeConfig,
    viewport: Size,
    phase: SwipePhase,
    direction: Option<Direction>,
    base_offset: Point,
    last_sample: GestureSample,
    // Whether the latest move carried a finite sample.
    clean: bool,
    feedback: DirectionFeedback,
    haptics: Rc<dyn HapticFeedback>,
    actions: [Option<SwipeAction>; 4],
    tap: Option<TapAction>,
    commit_guard: Option<CommitGuard>,
    offset: Animatable<Point>,
    // Bumped per gesture and on reset; stale animation ends compare it.
    gesture_id: u64,
    fling_target: Option<Point>,
}

/// Drives one swipeable surface. Cloning yields another handle to the same
/// controller.
#[derive(Clone)]
pub struct SwipeController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl SwipeController {
    pub fn new(config: SwipeConfig, viewport: Size, clock: FrameClock) -> Self {
        let inner = ControllerInner {
            config,
            viewport,
            phase: SwipePhase::Idle,
            direction: None,
            base_offset: Point::ZERO,
            last_sample: GestureSample::ZERO,
            clean: false,
            feedback: DirectionFeedback::new(),
            haptics: Rc::new(NoHaptics),
            actions: [None, None, None, None],
            tap: None,
            commit_guard: None,
            offset: Animatable::new(Point::ZERO, clock),
            gesture_id: 0,
            fling_target: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn set_haptics(&self, haptics: Rc<dyn HapticFeedback>) {
        self.inner.borrow_mut().haptics = haptics;
    }

    /// Registers the action run when a swipe commits to `direction`,
    /// replacing any previous one.
    pub fn on_swipe(
        &self,
        direction: Direction,
        action: impl Fn(Direction) -> Result<(), ActionError> + 'static,
    ) {
        self.inner.borrow_mut().actions[direction.index()] = Some(Rc::new(action));
    }

    pub fn on_tap(&self, action: impl Fn() + 'static) {
        self.inner.borrow_mut().tap = Some(Rc::new(action));
    }

    /// While `guard` returns true, releases that would commit snap back.
    pub fn set_commit_guard(&self, guard: impl Fn() -> bool + 'static) {
        self.inner.borrow_mut().commit_guard = Some(Rc::new(guard));
    }

    pub fn config(&self) -> SwipeConfig {
        self.inner.borrow().config.clone()
    }

    pub fn viewport(&self) -> Size {
        self.inner.borrow().viewport
    }

    /// Takes effect from the next release; distances already in the config
    /// are not rescaled.
    pub fn set_viewport(&self, viewport: Size) {
        self.inner.borrow_mut().viewport = viewport;
    }

    pub fn phase(&self) -> SwipePhase {
        self.inner.borrow().phase
    }

    pub fn current_direction(&self) -> Option<Direction> {
        self.inner.borrow().direction
    }

    pub fn offset(&self) -> Point {
        self.offset_handle().value()
    }

    pub fn state(&self) -> SwipeState {
        let inner = self.inner.borrow();
        SwipeState {
            phase: inner.phase,
            current_direction: inner.direction,
            offset: inner.offset.value(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.offset_handle().is_running()
    }

    /// Off-screen point of the fly-off in progress.
    pub fn fling_target(&self) -> Option<Point> {
        self.inner.borrow().fling_target
    }

    pub fn indicator_opacity(&self, direction: Direction) -> f32 {
        let inner = self.inner.borrow();
        indicator::indicator_opacity(&inner.config, direction, inner.offset.value(), inner.viewport)
    }

    pub fn rotation_degrees(&self) -> f32 {
        let inner = self.inner.borrow();
        indicator::rotation_degrees(inner.offset.value(), inner.viewport)
    }

    /// Resolves once the running fly-off or snap-back has ended, with the
    /// controller already back in `Idle`.
    pub fn settled(&self) -> AnimationFinished<Point> {
        self.offset_handle().finished()
    }

    /// Moves the resting offset while idle; the next gesture starts from it.
    pub fn set_offset(&self, offset: Point) -> bool {
        let handle = {
            let inner = self.inner.borrow();
            if inner.phase != SwipePhase::Idle || !offset.is_finite() {
                return false;
            }
            inner.offset.clone()
        };
        handle.snap_to(offset);
        true
    }

    /// Begins a drag. Ignored (returns false) unless idle, so a second
    /// pointer or a start during an animation never teleports the surface.
    pub fn gesture_start(&self) -> bool {
        let pulse = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != SwipePhase::Idle {
                log::debug!("gesture start ignored while {:?}", inner.phase);
                return false;
            }
            inner.phase = SwipePhase::Dragging;
            inner.gesture_id += 1;
            inner.base_offset = inner.offset.value();
            inner.last_sample = GestureSample::ZERO;
            inner.clean = false;
            inner.direction = None;
            inner.feedback.reset();
            inner
                .config
                .haptics
                .on_start
                .map(|pulse| (Rc::clone(&inner.haptics), pulse))
        };
        log::debug!("gesture started");
        perform(pulse);
        true
    }

    /// Follows the pointer 1:1 and reclassifies the direction.
    pub fn move_to(&self, sample: GestureSample) {
        let (handle, visual, pulse) = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != SwipePhase::Dragging {
                log::trace!("move ignored while {:?}", inner.phase);
                return;
            }
            let clean = sample.is_finite();
            if !clean {
                log::warn!("malformed gesture sample {sample:?}; using zero for this tick");
            }
            let sample = inner.config.project(sample.sanitized());
            let direction = classify(
                sample.dx,
                sample.dy,
                inner.config.allowed_directions,
                inner.config.direction_dead_zone_px,
            );
            let rearm = inner.config.rearm_distance_px();
            let edge = inner
                .feedback
                .update(direction, sample.translation().max_abs(), rearm);
            let visual =
                inner.base_offset + inner.config.clamp_drag(sample.translation(), inner.viewport);

            inner.last_sample = sample;
            inner.clean = clean;
            inner.direction = direction;
            log::trace!("drag ({}, {}) -> {direction:?}", sample.dx, sample.dy);

            let pulse = edge
                .and(inner.config.haptics.on_direction_change)
                .map(|pulse| (Rc::clone(&inner.haptics), pulse));
            (inner.offset.clone(), visual, pulse)
        };
        handle.snap_to(visual);
        perform(pulse);
    }

    /// Ends the drag at the last sample. `None` when not dragging.
    pub fn release(&self) -> Option<ReleaseOutcome> {
        let (sample, guard) = {
            let inner = self.inner.borrow();
            if inner.phase != SwipePhase::Dragging {
                return None;
            }
            (inner.last_sample, inner.commit_guard.clone())
        };
        self.finish_gesture(sample, guard)
    }

    /// Platform lost the pointer. Behaves like `release` at the last sample,
    /// or snaps back when that sample was not clean.
    pub fn cancel(&self) -> Option<ReleaseOutcome> {
        let (sample, clean, guard) = {
            let inner = self.inner.borrow();
            if inner.phase != SwipePhase::Dragging {
                return None;
            }
            (inner.last_sample, inner.clean, inner.commit_guard.clone())
        };
        if !clean {
            log::debug!("gesture cancelled without a clean sample");
            self.inner.borrow_mut().phase = SwipePhase::SnappingBack;
            self.animate_home();
            return Some(ReleaseOutcome::SnapBack);
        }
        self.finish_gesture(sample, guard)
    }

    /// Springs an idle surface back to rest.
    pub fn snap_back(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != SwipePhase::Idle {
                return false;
            }
            inner.phase = SwipePhase::SnappingBack;
            inner.direction = None;
        }
        self.animate_home();
        true
    }

    /// Stops any animation and puts the surface back at rest immediately.
    pub fn reset(&self) {
        let handle = {
            let mut inner = self.inner.borrow_mut();
            inner.phase = SwipePhase::Idle;
            inner.direction = None;
            inner.fling_target = None;
            inner.feedback.reset();
            inner.gesture_id += 1;
            inner.offset.clone()
        };
        handle.snap_to(Point::ZERO);
    }

    fn offset_handle(&self) -> Animatable<Point> {
        self.inner.borrow().offset.clone()
    }

    fn finish_gesture(
        &self,
        sample: GestureSample,
        guard: Option<CommitGuard>,
    ) -> Option<ReleaseOutcome> {
        let processing = guard.is_some_and(|guard| guard());
        let outcome = {
            let inner = self.inner.borrow();
            // The guard may have reset us.
            if inner.phase != SwipePhase::Dragging {
                return None;
            }
            decide_release(&sample, &inner.config, inner.viewport, processing)
        };
        log::debug!("gesture released: {outcome:?}");

        match outcome {
            ReleaseOutcome::Tap => self.complete_tap(),
            ReleaseOutcome::Commit(direction) => self.commit(direction),
            ReleaseOutcome::SnapBack => {
                {
                    let mut inner = self.inner.borrow_mut();
                    inner.phase = SwipePhase::SnappingBack;
                    inner.direction = None;
                }
                self.animate_home();
            }
        }
        Some(outcome)
    }

    fn complete_tap(&self) {
        let (handle, base, tap) = {
            let mut inner = self.inner.borrow_mut();
            inner.phase = SwipePhase::Idle;
            inner.direction = None;
            inner.feedback.reset();
            (inner.offset.clone(), inner.base_offset, inner.tap.clone())
        };
        handle.snap_to(base);
        if let Some(tap) = tap {
            tap();
        }
    }

    fn commit(&self, direction: Direction) {
        let (motion, pulse) = {
            let mut inner = self.inner.borrow_mut();
            inner.phase = SwipePhase::Committing;
            inner.direction = Some(direction);
            let pulse = inner
                .config
                .haptics
                .on_commit
                .map(|commit| (Rc::clone(&inner.haptics), commit.for_direction(direction)));
            (inner.config.commit_motion, pulse)
        };
        perform(pulse);

        match motion {
            CommitMotion::FlyOff => self.fly_off(direction),
            CommitMotion::SpringBack => {
                self.run_action(direction);
                self.animate_home();
            }
        }
    }

    fn fly_off(&self, direction: Direction) {
        let (handle, target, spec, gesture_id) = {
            let mut inner = self.inner.borrow_mut();
            let from = inner.offset.value();
            let target = inner.config.fling_target(direction, from, inner.viewport);
            inner.fling_target = Some(target);
            let spec = TweenSpec::tween(inner.config.fling_duration_ms, Easing::EaseInOut);
            (inner.offset.clone(), target, spec, inner.gesture_id)
        };
        log::debug!("flying off {direction} to {target:?}");

        let weak = Rc::downgrade(&self.inner);
        handle.animate_to(target, AnimationKind::Tween(spec), move |reason| {
            if let Some(inner) = weak.upgrade() {
                SwipeController { inner }.finish_fly_off(gesture_id, direction, reason);
            }
        });
    }

    fn finish_fly_off(&self, gesture_id: u64, direction: Direction, reason: AnimationEndReason) {
        if !self.is_current(gesture_id, SwipePhase::Committing) {
            return;
        }
        log::trace!("fly-off ended: {reason:?}");
        self.run_action(direction);

        let handle = {
            let mut inner = self.inner.borrow_mut();
            if inner.gesture_id == gesture_id {
                inner.phase = SwipePhase::Idle;
                inner.direction = None;
                inner.fling_target = None;
                inner.feedback.reset();
            }
            inner.offset.clone()
        };
        handle.snap_to(Point::ZERO);
    }

    fn run_action(&self, direction: Direction) {
        let action = self.inner.borrow().actions[direction.index()].clone();
        match action {
            Some(action) => {
                if let Err(err) = action(direction) {
                    log::warn!("swipe {direction} action failed: {err}");
                }
            }
            None => log::trace!("no action registered for {direction}"),
        }
    }

    /// Springs the offset to zero; the phase returns to `Idle` when it lands.
    fn animate_home(&self) {
        let (handle, spring, gesture_id) = {
            let inner = self.inner.borrow();
            (inner.offset.clone(), inner.config.snap_back_spring, inner.gesture_id)
        };
        let weak = Rc::downgrade(&self.inner);
        handle.animate_to(Point::ZERO, AnimationKind::Spring(spring), move |_| {
            if let Some(inner) = weak.upgrade() {
                SwipeController { inner }.settle(gesture_id);
            }
        });
    }

    fn settle(&self, gesture_id: u64) {
        let mut inner = self.inner.borrow_mut();
        let animating = matches!(inner.phase, SwipePhase::Committing | SwipePhase::SnappingBack);
        if inner.gesture_id != gesture_id || !animating {
            return;
        }
        log::debug!("settled from {:?}", inner.phase);
        inner.phase = SwipePhase::Idle;
        inner.direction = None;
        inner.feedback.reset();
    }

    fn is_current(&self, gesture_id: u64, phase: SwipePhase) -> bool {
        let inner = self.inner.borrow();
        inner.gesture_id == gesture_id && inner.phase == phase
    }
}

fn perform(pulse: Option<(Rc<dyn HapticFeedback>, HapticPulse)>) {
    if let Some((haptics, pulse)) = pulse {
        haptics.perform(pulse);
    }
}

impl fmt::Debug for SwipeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("SwipeController")
            .field("phase", &state.phase)
            .field("direction", &state.current_direction)
            .field("offset", &state.offset)
            .finish()
    }
}
