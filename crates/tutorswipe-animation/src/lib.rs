//! Animation system for tutorswipe: eased tweens and damped springs driven
//! by the runtime frame clock.

mod animation;

pub use animation::*;
