//! Swipe surface configuration and the two stock presets.

use tutorswipe_animation::SpringSpec;
use tutorswipe_ui_graphics::{Point, Size};

use super::direction::{Axis, Direction, DirectionSet};
use super::haptics::{CommitPulse, HapticProfile, HapticPulse};
use super::sample::GestureSample;
use crate::gesture_constants::*;

/// One value per direction.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PerDirection<T> {
    pub left: T,
    pub right: T,
    pub up: T,
    pub down: T,
}

impl<T: Copy> PerDirection<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            left: value,
            right: value,
            up: value,
            down: value,
        }
    }

    pub fn by_axis(horizontal: T, vertical: T) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            up: vertical,
            down: vertical,
        }
    }

    pub fn get(&self, direction: Direction) -> T {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

/// What a committed swipe does visually.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitMotion {
    /// Tween off-screen, then run the action and recenter (discovery card).
    FlyOff,
    /// Run the action at release and spring back to rest (inbox row).
    SpringBack,
}

/// How a direction indicator's opacity follows the drag distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorCurve {
    /// Rises to `knee_opacity` at `knee_px`, then to 1.0 at
    /// `full_fraction` of the axis extent.
    Knee {
        knee_px: f32,
        knee_opacity: f32,
        full_fraction: f32,
    },
    /// Linear from 0.0 at rest to 1.0 at the commit distance.
    LinearToCommit,
}

/// Immutable per-surface swipe configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeConfig {
    pub allowed_directions: DirectionSet,
    pub direction_dead_zone_px: f32,
    /// Haptic re-arm distance as a fraction of the dead zone.
    pub rearm_fraction: f32,
    /// Commit distance per direction, as a fraction of the reference extent.
    pub commit_distance_fraction: PerDirection<f32>,
    /// Viewport extent the commit fractions and indicator curve measure
    /// against. `None` uses each direction's own axis: width for Left/Right,
    /// height for Up/Down.
    pub commit_reference_axis: Option<Axis>,
    /// Release velocity (px/ms) that commits regardless of distance.
    pub commit_velocity_threshold: f32,
    /// `None` disables tap detection.
    pub tap_max_displacement_px: Option<f32>,
    pub snap_back_spring: SpringSpec,
    pub fling_duration_ms: u64,
    /// Fling distance as a multiple of the viewport extent.
    pub fling_overshoot_fraction: f32,
    pub commit_motion: CommitMotion,
    /// Visual drag limit as a fraction of the axis extent.
    pub max_drag_fraction: Option<f32>,
    pub indicator: IndicatorCurve,
    pub haptics: HapticProfile,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::card()
    }
}

impl SwipeConfig {
    /// Free four-way swipe of the discovery card.
    pub fn card() -> Self {
        Self {
            allowed_directions: DirectionSet::ALL,
            direction_dead_zone_px: CARD_DEAD_ZONE,
            rearm_fraction: 1.0,
            commit_distance_fraction: PerDirection::by_axis(
                CARD_COMMIT_FRACTION,
                CARD_COMMIT_FRACTION * CARD_SECONDARY_AXIS_FACTOR,
            ),
            // Vertical swipes are measured against the width too, so they
            // commit sooner than horizontal ones.
            commit_reference_axis: Some(Axis::Horizontal),
            commit_velocity_threshold: CARD_FLICK_VELOCITY,
            tap_max_displacement_px: Some(CARD_TAP_MAX_DISPLACEMENT),
            snap_back_spring: SpringSpec::from_origami(50.0, 7.0).with_overshoot_clamping(true),
            fling_duration_ms: FLING_DURATION_MS,
            fling_overshoot_fraction: FLING_OVERSHOOT_FRACTION,
            commit_motion: CommitMotion::FlyOff,
            max_drag_fraction: None,
            indicator: IndicatorCurve::Knee {
                knee_px: CARD_DEAD_ZONE,
                knee_opacity: 0.8,
                full_fraction: 0.5,
            },
            haptics: HapticProfile {
                on_start: Some(HapticPulse::Selection),
                on_direction_change: Some(HapticPulse::LightImpact),
                on_commit: Some(CommitPulse::BySentiment),
            },
        }
    }

    /// Horizontal swipe-to-reveal of an inbox row. The dead zone scales with
    /// the viewport width, so the preset needs it.
    pub fn list_row(viewport: Size) -> Self {
        Self {
            allowed_directions: DirectionSet::HORIZONTAL,
            direction_dead_zone_px: viewport.width * ROW_DEAD_ZONE_FRACTION,
            rearm_fraction: ROW_REARM_FRACTION,
            commit_distance_fraction: PerDirection::by_axis(ROW_COMMIT_FRACTION, 0.0),
            commit_reference_axis: None,
            // Rows commit on distance only.
            commit_velocity_threshold: f32::INFINITY,
            tap_max_displacement_px: None,
            snap_back_spring: SpringSpec::from_damping(20.0, 200.0).with_overshoot_clamping(true),
            fling_duration_ms: FLING_DURATION_MS,
            fling_overshoot_fraction: FLING_OVERSHOOT_FRACTION,
            commit_motion: CommitMotion::SpringBack,
            max_drag_fraction: Some(ROW_MAX_DRAG_FRACTION),
            indicator: IndicatorCurve::LinearToCommit,
            haptics: HapticProfile::default(),
        }
    }

    pub fn with_allowed_directions(mut self, allowed: DirectionSet) -> Self {
        self.allowed_directions = allowed;
        self
    }

    pub fn with_dead_zone(mut self, dead_zone_px: f32) -> Self {
        self.direction_dead_zone_px = dead_zone_px;
        self
    }

    pub fn with_commit_distance_fraction(mut self, fractions: PerDirection<f32>) -> Self {
        self.commit_distance_fraction = fractions;
        self
    }

    pub fn with_commit_reference_axis(mut self, axis: Option<Axis>) -> Self {
        self.commit_reference_axis = axis;
        self
    }

    pub fn with_commit_velocity_threshold(mut self, threshold: f32) -> Self {
        self.commit_velocity_threshold = threshold;
        self
    }

    pub fn with_tap_max_displacement(mut self, max_px: Option<f32>) -> Self {
        self.tap_max_displacement_px = max_px;
        self
    }

    pub fn with_snap_back_spring(mut self, spring: SpringSpec) -> Self {
        self.snap_back_spring = spring;
        self
    }

    pub fn with_fling(mut self, duration_ms: u64, overshoot_fraction: f32) -> Self {
        self.fling_duration_ms = duration_ms;
        self.fling_overshoot_fraction = overshoot_fraction;
        self
    }

    pub fn with_commit_motion(mut self, motion: CommitMotion) -> Self {
        self.commit_motion = motion;
        self
    }

    pub fn with_haptics(mut self, haptics: HapticProfile) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn commit_distance_px(&self, direction: Direction, viewport: Size) -> f32 {
        self.commit_distance_fraction.get(direction) * self.reference_extent(direction, viewport)
    }

    /// Extent that commit and indicator fractions for `direction` scale with.
    pub fn reference_extent(&self, direction: Direction, viewport: Size) -> f32 {
        let axis = self.commit_reference_axis.unwrap_or(direction.axis());
        axis_extent(axis, viewport)
    }

    pub fn rearm_distance_px(&self) -> f32 {
        self.direction_dead_zone_px * self.rearm_fraction
    }

    /// Drops the component of `sample` along an axis that has no allowed
    /// direction, so a row never sees vertical intent. An empty set keeps
    /// both components.
    pub fn project(&self, sample: GestureSample) -> GestureSample {
        let allowed = self.allowed_directions;
        if allowed.is_empty() {
            return sample;
        }
        let mut projected = sample;
        if !allowed.allows_axis(Axis::Horizontal) {
            projected.dx = 0.0;
            projected.vx = 0.0;
        }
        if !allowed.allows_axis(Axis::Vertical) {
            projected.dy = 0.0;
            projected.vy = 0.0;
        }
        projected
    }

    /// Visual translation for a drag, honouring `max_drag_fraction`.
    pub fn clamp_drag(&self, translation: Point, viewport: Size) -> Point {
        let Some(fraction) = self.max_drag_fraction else {
            return translation;
        };
        let max_x = viewport.width * fraction;
        let max_y = viewport.height * fraction;
        Point::new(
            translation.x.clamp(-max_x, max_x),
            translation.y.clamp(-max_y, max_y),
        )
    }

    /// Off-screen resting point of a fly-off along `direction`. The cross
    /// axis keeps its current offset.
    pub fn fling_target(&self, direction: Direction, from: Point, viewport: Size) -> Point {
        let distance =
            direction.sign() * self.fling_overshoot_fraction * axis_extent(direction.axis(), viewport);
        match direction.axis() {
            Axis::Horizontal => Point::new(distance, from.y),
            Axis::Vertical => Point::new(from.x, distance),
        }
    }
}

pub(crate) fn axis_extent(axis: Axis, viewport: Size) -> f32 {
    match axis {
        Axis::Horizontal => viewport.width,
        Axis::Vertical => viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(400.0, 800.0);

    #[test]
    fn card_commit_distances_scale_with_width() {
        let config = SwipeConfig::card();
        assert_eq!(config.commit_distance_px(Direction::Right, PHONE), 100.0);
        assert_eq!(config.commit_distance_px(Direction::Left, PHONE), 100.0);
        assert!((config.commit_distance_px(Direction::Up, PHONE) - 80.0).abs() < 1e-3);
        assert!((config.commit_distance_px(Direction::Down, PHONE) - 80.0).abs() < 1e-3);
    }

    #[test]
    fn per_axis_reference_uses_height_for_vertical() {
        let config = SwipeConfig::card().with_commit_reference_axis(None);
        assert!((config.commit_distance_px(Direction::Up, PHONE) - 160.0).abs() < 1e-3);
        assert_eq!(config.reference_extent(Direction::Left, PHONE), 400.0);
    }

    #[test]
    fn row_preset_scales_with_width() {
        let config = SwipeConfig::list_row(PHONE);
        assert!((config.direction_dead_zone_px - 48.0).abs() < 1e-4);
        assert!((config.rearm_distance_px() - 32.0).abs() < 1e-3);
        assert!((config.commit_distance_px(Direction::Left, PHONE) - 60.0).abs() < 1e-4);
        assert_eq!(config.allowed_directions, DirectionSet::HORIZONTAL);
        assert!(config.snap_back_spring.overshoot_clamping);
    }

    #[test]
    fn row_projection_drops_vertical_component() {
        let config = SwipeConfig::list_row(PHONE);
        let projected = config.project(GestureSample::new(30.0, 90.0, 0.2, 1.0));
        assert_eq!(projected, GestureSample::new(30.0, 0.0, 0.2, 0.0));

        let free = SwipeConfig::card().with_allowed_directions(DirectionSet::EMPTY);
        let sample = GestureSample::new(30.0, 90.0, 0.2, 1.0);
        assert_eq!(free.project(sample), sample);
    }

    #[test]
    fn row_drag_is_clamped() {
        let config = SwipeConfig::list_row(PHONE);
        assert_eq!(
            config.clamp_drag(Point::new(-300.0, 0.0), PHONE),
            Point::new(-100.0, 0.0)
        );
        assert_eq!(
            SwipeConfig::card().clamp_drag(Point::new(-300.0, 5.0), PHONE),
            Point::new(-300.0, 5.0)
        );
    }

    #[test]
    fn fling_target_is_off_screen_along_direction() {
        let config = SwipeConfig::card();
        let from = Point::new(120.0, 14.0);
        assert_eq!(
            config.fling_target(Direction::Right, from, PHONE),
            Point::new(600.0, 14.0)
        );
        assert_eq!(
            config.fling_target(Direction::Up, from, PHONE),
            Point::new(120.0, -1200.0)
        );
    }
}
