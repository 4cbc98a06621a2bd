//! Platform abstraction for frame scheduling.
//!
//! The host (a native view, a test harness, the headless demo) decides when
//! frames actually run. The runtime only asks for one.

/// Schedules frames on behalf of the runtime.
///
/// Implementations must be safe to share across threads even though the
/// runtime itself lives on the UI thread.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Hosts that poll
/// [`Runtime::needs_frame`](crate::Runtime::needs_frame) use this.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
