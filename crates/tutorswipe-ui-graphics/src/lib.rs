//! Pure math/data for tutorswipe.
//!
//! Geometry primitives shared by the gesture interpreter, the animation
//! system and the screens.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Size};
}
