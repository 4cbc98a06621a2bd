//! Swipe directions and the dead-zone direction classifier.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Screen-space sign: positive x is right, positive y is down.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Right | Direction::Down => 1.0,
            Direction::Left | Direction::Up => -1.0,
        }
    }

    /// The direction a signed displacement along `axis` points to; `None`
    /// for zero.
    pub fn from_signed(axis: Axis, value: f32) -> Option<Direction> {
        match axis {
            Axis::Horizontal if value > 0.0 => Some(Direction::Right),
            Axis::Horizontal if value < 0.0 => Some(Direction::Left),
            Axis::Vertical if value > 0.0 => Some(Direction::Down),
            Axis::Vertical if value < 0.0 => Some(Direction::Up),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Horizontal when `|x| > |y|`; ties go vertical.
    pub fn dominant(x: f32, y: f32) -> Axis {
        if x.abs() > y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// The component of `(x, y)` along this axis.
    pub fn pick(self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }
}

/// Set of directions a swipe may resolve to.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    pub const HORIZONTAL: DirectionSet = DirectionSet(0b0011);
    pub const VERTICAL: DirectionSet = DirectionSet(0b1100);
    pub const ALL: DirectionSet = DirectionSet(0b1111);

    pub fn with(self, direction: Direction) -> Self {
        DirectionSet(self.0 | direction.bit())
    }

    pub fn without(self, direction: Direction) -> Self {
        DirectionSet(self.0 & !direction.bit())
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn allows_axis(self, axis: Axis) -> bool {
        let mask = match axis {
            Axis::Horizontal => Self::HORIZONTAL.0,
            Axis::Vertical => Self::VERTICAL.0,
        };
        self.0 & mask != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(DirectionSet::EMPTY, DirectionSet::with)
    }
}

impl fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Candidate direction of a drag at `(dx, dy)`.
///
/// `None` while both components sit inside the dead zone, or when the
/// dominant direction is not in `allowed`.
pub fn classify(dx: f32, dy: f32, allowed: DirectionSet, dead_zone: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() <= dead_zone && dy.abs() <= dead_zone {
        return None;
    }
    let axis = Axis::dominant(dx, dy);
    let magnitude = axis.pick(dx, dy);
    if magnitude.abs() <= dead_zone {
        return None;
    }
    Direction::from_signed(axis, magnitude).filter(|direction| allowed.contains(*direction))
}

/// Edge detector for direction-change haptics.
///
/// Fires when the classified direction becomes a new non-`None` value. Once
/// fired it stays quiet for that direction until the drag falls back under
/// the re-arm distance, so jitter around the dead-zone edge does not pulse.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionFeedback {
    fired: Option<Direction>,
}

impl DirectionFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the direction to pulse for, if this sample is an edge.
    pub fn update(
        &mut self,
        direction: Option<Direction>,
        magnitude: f32,
        rearm_distance: f32,
    ) -> Option<Direction> {
        match direction {
            Some(direction) if self.fired != Some(direction) => {
                self.fired = Some(direction);
                Some(direction)
            }
            Some(_) => None,
            None => {
                if magnitude <= rearm_distance {
                    self.fired = None;
                }
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAD: f32 = 40.0;

    #[test]
    fn inside_dead_zone_is_none() {
        for (dx, dy) in [(0.0, 0.0), (40.0, -40.0), (-39.9, 12.0), (5.0, 40.0)] {
            assert_eq!(classify(dx, dy, DirectionSet::ALL, DEAD), None, "({dx}, {dy})");
        }
    }

    #[test]
    fn dominant_axis_decides() {
        assert_eq!(classify(60.0, 10.0, DirectionSet::ALL, DEAD), Some(Direction::Right));
        assert_eq!(classify(-60.0, 59.0, DirectionSet::ALL, DEAD), Some(Direction::Left));
        assert_eq!(classify(10.0, 60.0, DirectionSet::ALL, DEAD), Some(Direction::Down));
        assert_eq!(classify(10.0, -60.0, DirectionSet::ALL, DEAD), Some(Direction::Up));
        // Ties resolve vertically.
        assert_eq!(classify(50.0, 50.0, DirectionSet::ALL, DEAD), Some(Direction::Down));
    }

    #[test]
    fn disallowed_direction_is_none() {
        assert_eq!(classify(10.0, 80.0, DirectionSet::HORIZONTAL, DEAD), None);
        assert_eq!(
            classify(80.0, 10.0, DirectionSet::HORIZONTAL, DEAD),
            Some(Direction::Right)
        );
        assert_eq!(classify(80.0, 0.0, DirectionSet::EMPTY, DEAD), None);
    }

    #[test]
    fn non_finite_input_is_none() {
        assert_eq!(classify(f32::NAN, 0.0, DirectionSet::ALL, DEAD), None);
        assert_eq!(classify(0.0, f32::INFINITY, DirectionSet::ALL, DEAD), None);
    }

    #[test]
    fn direction_set_operations() {
        let set: DirectionSet = [Direction::Left, Direction::Up].into_iter().collect();
        assert!(set.contains(Direction::Left));
        assert!(!set.contains(Direction::Right));
        assert!(set.allows_axis(Axis::Vertical));
        assert_eq!(set.without(Direction::Up), DirectionSet::EMPTY.with(Direction::Left));
        assert_eq!(DirectionSet::ALL.iter().count(), 4);
        assert!(!DirectionSet::HORIZONTAL.allows_axis(Axis::Vertical));
    }

    #[test]
    fn feedback_fires_once_per_new_direction() {
        let mut feedback = DirectionFeedback::new();
        assert_eq!(feedback.update(Some(Direction::Right), 50.0, DEAD), Some(Direction::Right));
        assert_eq!(feedback.update(Some(Direction::Right), 70.0, DEAD), None);
        assert_eq!(feedback.update(Some(Direction::Up), 70.0, DEAD), Some(Direction::Up));
    }

    #[test]
    fn feedback_rearms_only_below_threshold() {
        let mut feedback = DirectionFeedback::new();
        let rearm = DEAD * 2.0 / 3.0;
        assert!(feedback.update(Some(Direction::Left), 45.0, rearm).is_some());
        // Back inside the dead zone but above the re-arm band: no pulse on return.
        assert_eq!(feedback.update(None, 35.0, rearm), None);
        assert_eq!(feedback.update(Some(Direction::Left), 45.0, rearm), None);
        // Below the band: armed again.
        assert_eq!(feedback.update(None, 20.0, rearm), None);
        assert_eq!(feedback.update(Some(Direction::Left), 45.0, rearm), Some(Direction::Left));
    }
}
