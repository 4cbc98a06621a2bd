use std::cell::RefCell;
use std::rc::Rc;

use tutorswipe_foundation::{HapticFeedback, HapticPulse};

/// Haptics sink that remembers every pulse, in order.
#[derive(Clone, Default)]
pub struct RecordingHaptics {
    pulses: Rc<RefCell<Vec<HapticPulse>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to hand to a controller.
    pub fn handle(&self) -> Rc<dyn HapticFeedback> {
        Rc::new(self.clone())
    }

    pub fn pulses(&self) -> Vec<HapticPulse> {
        self.pulses.borrow().clone()
    }

    pub fn count(&self, pulse: HapticPulse) -> usize {
        self.pulses.borrow().iter().filter(|p| **p == pulse).count()
    }

    pub fn clear(&self) {
        self.pulses.borrow_mut().clear();
    }
}

impl HapticFeedback for RecordingHaptics {
    fn perform(&self, pulse: HapticPulse) {
        self.pulses.borrow_mut().push(pulse);
    }
}
