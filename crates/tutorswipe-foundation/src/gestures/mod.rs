//! Directional swipe interpretation.

mod commit;
mod config;
mod controller;
mod direction;
mod haptics;
mod indicator;
mod sample;

pub use commit::{decide_release, is_tap, should_commit, ReleaseOutcome};
pub use config::{CommitMotion, IndicatorCurve, PerDirection, SwipeConfig};
pub use controller::{ActionError, SwipeController, SwipePhase, SwipeState};
pub use direction::{classify, Axis, Direction, DirectionFeedback, DirectionSet};
pub use haptics::{CommitPulse, HapticFeedback, HapticProfile, HapticPulse, NoHaptics};
pub use indicator::{indicator_opacity, rotation_degrees, MAX_TILT_DEGREES};
pub use sample::{GestureSample, GestureSampler};
