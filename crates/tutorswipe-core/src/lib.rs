//! Core runtime for tutorswipe: the UI-thread frame-callback queue that
//! drives every gesture animation, plus the platform scheduling hook.

pub mod collections;
mod frame_clock;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};

/// Nanoseconds per 60Hz frame, the step test harnesses and the demo use.
pub const FRAME_NANOS_60HZ: u64 = 16_666_667;
