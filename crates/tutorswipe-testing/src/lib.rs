//! Testing utilities for tutorswipe

pub mod frame_driver;
pub mod gestures;
pub mod haptics;
pub mod providers;

pub use frame_driver::FrameDriver;
pub use haptics::RecordingHaptics;
pub use providers::{MockBillingProvider, MockVideoProvider, PurchaseBehavior, VideoCall};

pub mod prelude {
    pub use crate::frame_driver::FrameDriver;
    pub use crate::gestures;
    pub use crate::haptics::RecordingHaptics;
    pub use crate::providers::*;
}
