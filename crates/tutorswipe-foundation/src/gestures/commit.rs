//! Release-time decision: tap, commit or snap back.

use tutorswipe_ui_graphics::Size;

use super::config::SwipeConfig;
use super::direction::{Axis, Direction};
use super::sample::GestureSample;

/// Terminal outcome of one gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Tap,
    Commit(Direction),
    SnapBack,
}

/// Direction the release commits to, or `None` to snap back.
///
/// Looks at the dominant axis only and commits when EITHER the
/// displacement passes that direction's commit distance OR the velocity
/// passes the flick threshold.
pub fn should_commit(sample: &GestureSample, config: &SwipeConfig, viewport: Size) -> Option<Direction> {
    let GestureSample { dx, dy, vx, vy } = *sample;
    let axis = if dx == 0.0 && dy == 0.0 {
        Axis::dominant(vx, vy)
    } else {
        Axis::dominant(dx, dy)
    };
    let displacement = axis.pick(dx, dy);
    let velocity = axis.pick(vx, vy);
    let heading = if displacement != 0.0 { displacement } else { velocity };

    let direction = Direction::from_signed(axis, heading)?;
    if !config.allowed_directions.contains(direction) {
        return None;
    }

    let reached = displacement.abs() > config.commit_distance_px(direction, viewport);
    let flicked = velocity.abs() > config.commit_velocity_threshold;
    (reached || flicked).then_some(direction)
}

/// Small, slow releases are taps on surfaces that enable them.
pub fn is_tap(sample: &GestureSample, config: &SwipeConfig) -> bool {
    let Some(max_displacement) = config.tap_max_displacement_px else {
        return false;
    };
    let slow = sample.vx.abs() < config.commit_velocity_threshold
        && sample.vy.abs() < config.commit_velocity_threshold;
    sample.dx.abs() < max_displacement && sample.dy.abs() < max_displacement && slow
}

/// Full release decision. `processing` forces any would-be commit to snap
/// back.
pub fn decide_release(
    sample: &GestureSample,
    config: &SwipeConfig,
    viewport: Size,
    processing: bool,
) -> ReleaseOutcome {
    if is_tap(sample, config) {
        return ReleaseOutcome::Tap;
    }
    match should_commit(sample, config, viewport) {
        Some(direction) if processing => {
            log::debug!("commit {direction} suppressed while processing");
            ReleaseOutcome::SnapBack
        }
        Some(direction) => ReleaseOutcome::Commit(direction),
        None => ReleaseOutcome::SnapBack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::direction::DirectionSet;

    const PHONE: Size = Size::new(400.0, 800.0);

    #[test]
    fn distance_past_threshold_commits() {
        let config = SwipeConfig::card();
        for dx in [100.5, 150.0, 399.0] {
            assert_eq!(
                should_commit(&GestureSample::at(dx, 0.0), &config, PHONE),
                Some(Direction::Right)
            );
        }
        assert_eq!(
            should_commit(&GestureSample::at(-120.0, 30.0), &config, PHONE),
            Some(Direction::Left)
        );
        assert_eq!(should_commit(&GestureSample::at(99.0, 0.0), &config, PHONE), None);
    }

    #[test]
    fn secondary_axis_commits_at_a_lower_distance() {
        let config = SwipeConfig::card();
        assert_eq!(should_commit(&GestureSample::at(0.0, -75.0), &config, PHONE), None);
        assert_eq!(
            should_commit(&GestureSample::at(0.0, -85.0), &config, PHONE),
            Some(Direction::Up)
        );
        assert_eq!(
            should_commit(&GestureSample::at(5.0, 120.0), &config, PHONE),
            Some(Direction::Down)
        );
    }

    #[test]
    fn flick_commits_regardless_of_distance() {
        let config = SwipeConfig::card();
        let flick = GestureSample::new(-30.0, 4.0, -0.9, 0.0);
        assert_eq!(should_commit(&flick, &config, PHONE), Some(Direction::Left));

        // Flick with no displacement resolves from the velocity.
        let pure = GestureSample::new(0.0, 0.0, 0.0, 0.8);
        assert_eq!(should_commit(&pure, &config, PHONE), Some(Direction::Down));
    }

    #[test]
    fn disallowed_direction_never_commits() {
        let config = SwipeConfig::card().with_allowed_directions(DirectionSet::HORIZONTAL);
        assert_eq!(should_commit(&GestureSample::at(0.0, 500.0), &config, PHONE), None);

        let empty = SwipeConfig::card().with_allowed_directions(DirectionSet::EMPTY);
        assert_eq!(should_commit(&GestureSample::at(300.0, 0.0), &empty, PHONE), None);
    }

    #[test]
    fn row_ignores_velocity() {
        let config = SwipeConfig::list_row(PHONE);
        let fast = GestureSample::new(20.0, 0.0, 5.0, 0.0);
        assert_eq!(should_commit(&fast, &config, PHONE), None);
    }

    #[test]
    fn small_slow_release_is_tap() {
        let config = SwipeConfig::card();
        for (dx, dy) in [(0.0, 0.0), (5.0, 0.0), (-14.9, 14.9)] {
            let sample = GestureSample::new(dx, dy, 0.1, -0.2);
            assert_eq!(decide_release(&sample, &config, PHONE, false), ReleaseOutcome::Tap);
        }
        let quick = GestureSample::new(5.0, 0.0, 0.6, 0.0);
        assert_eq!(
            decide_release(&quick, &config, PHONE, false),
            ReleaseOutcome::Commit(Direction::Right)
        );
    }

    #[test]
    fn rows_have_no_taps() {
        let config = SwipeConfig::list_row(PHONE);
        assert!(!is_tap(&GestureSample::ZERO, &config));
        assert_eq!(
            decide_release(&GestureSample::ZERO, &config, PHONE, false),
            ReleaseOutcome::SnapBack
        );
    }

    #[test]
    fn processing_forces_snap_back() {
        let config = SwipeConfig::list_row(PHONE);
        let sample = GestureSample::at(-80.0, 0.0);
        assert_eq!(
            decide_release(&sample, &config, PHONE, false),
            ReleaseOutcome::Commit(Direction::Left)
        );
        assert_eq!(
            decide_release(&sample, &config, PHONE, true),
            ReleaseOutcome::SnapBack
        );
    }
}
