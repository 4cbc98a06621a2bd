//! Direction indicator opacity and the card tilt hint.

use tutorswipe_ui_graphics::{Point, Size};

use super::config::{IndicatorCurve, SwipeConfig};
use super::direction::{Axis, Direction};

/// Opacity in `[0, 1]` of the indicator for `direction` at `offset`.
/// Directions outside the allowed set stay hidden.
pub fn indicator_opacity(
    config: &SwipeConfig,
    direction: Direction,
    offset: Point,
    viewport: Size,
) -> f32 {
    if !config.allowed_directions.contains(direction) {
        return 0.0;
    }
    let along = match direction.axis() {
        Axis::Horizontal => offset.x,
        Axis::Vertical => offset.y,
    } * direction.sign();
    if !along.is_finite() || along <= 0.0 {
        return 0.0;
    }

    let opacity = match config.indicator {
        IndicatorCurve::Knee {
            knee_px,
            knee_opacity,
            full_fraction,
        } => {
            let full_px = (full_fraction * config.reference_extent(direction, viewport)).max(knee_px);
            if along <= knee_px {
                knee_opacity * along / knee_px.max(f32::EPSILON)
            } else if full_px > knee_px {
                knee_opacity + (1.0 - knee_opacity) * (along - knee_px) / (full_px - knee_px)
            } else {
                1.0
            }
        }
        IndicatorCurve::LinearToCommit => {
            let full_px = config.commit_distance_px(direction, viewport);
            if full_px <= 0.0 {
                1.0
            } else {
                along / full_px
            }
        }
    };
    opacity.clamp(0.0, 1.0)
}

/// Maximum card tilt at a full-width horizontal drag.
pub const MAX_TILT_DEGREES: f32 = 15.0;

/// Card tilt in degrees for a horizontal offset, clamped to ±15°.
pub fn rotation_degrees(offset: Point, viewport: Size) -> f32 {
    if viewport.width <= 0.0 || !offset.x.is_finite() {
        return 0.0;
    }
    (offset.x / viewport.width * MAX_TILT_DEGREES).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(400.0, 800.0);

    #[test]
    fn card_indicator_follows_knee_curve() {
        let config = SwipeConfig::card();
        let right = |x: f32| indicator_opacity(&config, Direction::Right, Point::new(x, 0.0), PHONE);
        assert_eq!(right(0.0), 0.0);
        assert_eq!(right(-50.0), 0.0);
        assert!((right(20.0) - 0.4).abs() < 1e-5);
        assert!((right(40.0) - 0.8).abs() < 1e-5);
        assert!((right(120.0) - 0.9).abs() < 1e-5);
        assert_eq!(right(200.0), 1.0);
        assert_eq!(right(1000.0), 1.0);
    }

    #[test]
    fn card_vertical_indicator_matches_horizontal_scale() {
        let config = SwipeConfig::card();
        let up = indicator_opacity(&config, Direction::Up, Point::new(0.0, -120.0), PHONE);
        assert!((up - 0.9).abs() < 1e-5);
        let up = indicator_opacity(&config, Direction::Up, Point::new(0.0, -200.0), PHONE);
        assert_eq!(up, 1.0);
        let down = indicator_opacity(&config, Direction::Down, Point::new(0.0, -400.0), PHONE);
        assert_eq!(down, 0.0);
    }

    #[test]
    fn row_indicator_is_linear_to_commit_distance() {
        let config = SwipeConfig::list_row(PHONE);
        let left = indicator_opacity(&config, Direction::Left, Point::new(-30.0, 0.0), PHONE);
        assert!((left - 0.5).abs() < 1e-4);
        let full = indicator_opacity(&config, Direction::Left, Point::new(-90.0, 0.0), PHONE);
        assert_eq!(full, 1.0);
        let up = indicator_opacity(&config, Direction::Up, Point::new(0.0, -90.0), PHONE);
        assert_eq!(up, 0.0);
    }

    #[test]
    fn tilt_is_clamped() {
        assert_eq!(rotation_degrees(Point::new(200.0, 0.0), PHONE), 7.5);
        assert_eq!(rotation_degrees(Point::new(-900.0, 0.0), PHONE), -15.0);
        assert_eq!(rotation_degrees(Point::new(10.0, 0.0), Size::ZERO), 0.0);
    }
}
