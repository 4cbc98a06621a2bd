//! Gesture interpretation for tutorswipe.
//!
//! Raw pointer positions become [`GestureSample`]s, samples are classified
//! into directions, and a [`SwipeController`] turns a whole gesture into a
//! tap, a committed swipe or a snap-back.

pub mod gesture_constants;
pub mod gestures;
pub mod velocity_tracker;

pub use gestures::*;
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::gestures::{
        Direction, DirectionSet, GestureSample, ReleaseOutcome, SwipeConfig, SwipeController,
        SwipePhase,
    };
}
