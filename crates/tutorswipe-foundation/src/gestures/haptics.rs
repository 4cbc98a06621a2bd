//! Haptic feedback seam.
//!
//! Pulses are fire-and-forget: the controller never waits on them and a
//! platform that cannot vibrate simply ignores the request.

use super::direction::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticPulse {
    /// Selection tick.
    Selection,
    LightImpact,
    MediumImpact,
    Success,
    Warning,
}

/// Platform haptics collaborator.
pub trait HapticFeedback {
    fn perform(&self, pulse: HapticPulse);
}

/// Haptics sink for platforms without a vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn perform(&self, _pulse: HapticPulse) {}
}

/// Pulse played when a swipe commits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommitPulse {
    Fixed(HapticPulse),
    /// Success for Right/Up, warning for Left/Down.
    BySentiment,
}

impl CommitPulse {
    pub fn for_direction(self, direction: Direction) -> HapticPulse {
        match self {
            CommitPulse::Fixed(pulse) => pulse,
            CommitPulse::BySentiment => match direction {
                Direction::Right | Direction::Up => HapticPulse::Success,
                Direction::Left | Direction::Down => HapticPulse::Warning,
            },
        }
    }
}

/// Which pulses a swipe surface plays, and when.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HapticProfile {
    pub on_start: Option<HapticPulse>,
    pub on_direction_change: Option<HapticPulse>,
    pub on_commit: Option<CommitPulse>,
}

impl HapticProfile {
    pub const SILENT: HapticProfile = HapticProfile {
        on_start: None,
        on_direction_change: None,
        on_commit: None,
    };
}

impl Default for HapticProfile {
    fn default() -> Self {
        Self {
            on_start: None,
            on_direction_change: Some(HapticPulse::LightImpact),
            on_commit: Some(CommitPulse::Fixed(HapticPulse::MediumImpact)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_pulse_matches_direction() {
        let pulse = CommitPulse::BySentiment;
        assert_eq!(pulse.for_direction(Direction::Right), HapticPulse::Success);
        assert_eq!(pulse.for_direction(Direction::Up), HapticPulse::Success);
        assert_eq!(pulse.for_direction(Direction::Left), HapticPulse::Warning);
        assert_eq!(pulse.for_direction(Direction::Down), HapticPulse::Warning);
        assert_eq!(
            CommitPulse::Fixed(HapticPulse::MediumImpact).for_direction(Direction::Left),
            HapticPulse::MediumImpact
        );
    }
}
