use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, RuntimeScheduler};

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    last_frame_nanos: Cell<Option<u64>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            last_frame_nanos: Cell::new(None),
        }
    }

    fn schedule(&self) {
        if !self.needs_frame.replace(true) {
            self.scheduler.schedule_frame();
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.last_frame_nanos.set(Some(frame_time_nanos));
        // Callbacks registered while draining belong to the next frame.
        let pending: SmallVec<[FrameCallback; 8]> = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            callbacks
                .drain(..)
                .filter_map(|mut entry| entry.callback.take())
                .collect()
        };
        log::trace!(
            "frame {frame_time_nanos}: running {} callbacks",
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.needs_frame.set(self.has_frame_callbacks());
    }
}

/// Owner of the UI-thread frame-callback queue.
///
/// Everything animated in tutorswipe (card flings, spring-backs) registers
/// one-shot frame callbacks here; the host drives time forward by calling
/// [`RuntimeHandle::drain_frame_callbacks`] once per display frame.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

/// Weak handle to a [`Runtime`]. Every operation is a no-op once the
/// runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Time of the most recently drained frame, if any frame has run.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
