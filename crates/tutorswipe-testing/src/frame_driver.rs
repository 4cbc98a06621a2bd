//! Manual frame clock for headless tests.

use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll};

use tutorswipe_core::{FrameClock, Runtime, FRAME_NANOS_60HZ};

/// Upper bound for [`FrameDriver::run_until_idle`]; a minute at 60Hz.
pub const MAX_FRAMES: usize = 3_600;

/// Owns a [`Runtime`] and advances its time one 60Hz frame at a time.
pub struct FrameDriver {
    runtime: Runtime,
    now_nanos: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            now_nanos: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos / 1_000_000
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    /// Advances one frame and runs its callbacks.
    pub fn frame(&mut self) {
        self.now_nanos += FRAME_NANOS_60HZ;
        self.runtime.handle().drain_frame_callbacks(self.now_nanos);
    }

    pub fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    /// Advances at least `millis` of frame time. Returns the frames run.
    pub fn advance_millis(&mut self, millis: u64) -> usize {
        let until = self.now_nanos + millis * 1_000_000;
        let mut frames = 0;
        while self.now_nanos < until {
            self.frame();
            frames += 1;
        }
        frames
    }

    /// Steps frames until no callback is pending. Returns the frames run.
    ///
    /// # Panics
    ///
    /// When something is still animating after [`MAX_FRAMES`].
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.has_pending_frames() {
            assert!(
                frames < MAX_FRAMES,
                "still animating after {MAX_FRAMES} frames"
            );
            self.frame();
            frames += 1;
        }
        frames
    }

    /// Polls `future`, stepping frames while it is pending.
    ///
    /// # Panics
    ///
    /// When the future is pending with no frame scheduled to wake it, or
    /// after [`MAX_FRAMES`].
    pub fn block_on<F: Future>(&mut self, future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(futures_task::noop_waker_ref());
        for _ in 0..MAX_FRAMES {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
            assert!(
                self.has_pending_frames(),
                "future pending with no frame scheduled"
            );
            self.frame();
        }
        panic!("future still pending after {MAX_FRAMES} frames");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tutorswipe_core::RuntimeHandle;

    #[test]
    fn advance_millis_steps_whole_frames() {
        let mut driver = FrameDriver::new();
        assert_eq!(driver.advance_millis(100), 6);
        assert!(driver.now_millis() >= 100);
    }

    #[test]
    fn run_until_idle_drains_chained_callbacks() {
        let mut driver = FrameDriver::new();
        let clock = driver.clock();
        let remaining = Rc::new(Cell::new(3));

        fn chain(runtime: RuntimeHandle, remaining: Rc<Cell<u32>>) {
            let next = runtime.clone();
            runtime.register_frame_callback(move |_| {
                remaining.set(remaining.get() - 1);
                if remaining.get() > 0 {
                    chain(next, remaining);
                }
            });
        }

        chain(clock.runtime_handle(), Rc::clone(&remaining));
        assert_eq!(driver.run_until_idle(), 3);
        assert_eq!(remaining.get(), 0);
    }
}
