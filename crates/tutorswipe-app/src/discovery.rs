//! Tutor discovery: one card at a time, swiped in four directions.
//!
//! Right is "interested", Left "not interested", Up a super like and Down
//! "save for later". A double tap on the card front reveals the tutor's
//! intro video; taps on the video toggle playback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tutorswipe_core::FrameClock;
use tutorswipe_foundation::{
    ActionError, Direction, HapticFeedback, HapticPulse, NoHaptics, SwipeConfig, SwipeController,
};
use tutorswipe_ui_graphics::Size;
use web_time::Instant;

use crate::model::{Tutor, TutorId};
use crate::repository::TutorCatalog;

/// Two taps closer than this on the card front are a double tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    Interested,
    NotInterested,
    SuperLike,
    SaveForLater,
}

impl SwipeDecision {
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Right => SwipeDecision::Interested,
            Direction::Left => SwipeDecision::NotInterested,
            Direction::Up => SwipeDecision::SuperLike,
            Direction::Down => SwipeDecision::SaveForLater,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            SwipeDecision::Interested => Direction::Right,
            SwipeDecision::NotInterested => Direction::Left,
            SwipeDecision::SuperLike => Direction::Up,
            SwipeDecision::SaveForLater => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionRecord {
    pub tutor: TutorId,
    pub decision: SwipeDecision,
}

/// Which side of the current card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Video {
        playing: bool,
    },
}

struct DeckState {
    tutors: Vec<Tutor>,
    index: usize,
    decisions: Vec<DecisionRecord>,
    face: CardFace,
    /// Tap times are wall-clock nanos since this instant. Taps schedule no
    /// frames, so frame time is stale while the host is idle.
    epoch: Instant,
    last_tap_nanos: Option<u64>,
    haptics: Rc<dyn HapticFeedback>,
}

impl DeckState {
    fn new(tutors: Vec<Tutor>) -> Self {
        Self {
            tutors,
            index: 0,
            decisions: Vec::new(),
            face: CardFace::Front,
            epoch: Instant::now(),
            last_tap_nanos: None,
            haptics: Rc::new(NoHaptics),
        }
    }

    fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn current(&self) -> Option<&Tutor> {
        self.tutors.get(self.index)
    }

    fn record(&mut self, decision: SwipeDecision) -> Option<DecisionRecord> {
        let tutor = self.current()?.id;
        let record = DecisionRecord { tutor, decision };
        self.decisions.push(record);
        // The last card stays on screen.
        if self.index + 1 < self.tutors.len() {
            self.index += 1;
        }
        self.face = CardFace::Front;
        self.last_tap_nanos = None;
        log::debug!("tutor {tutor}: {decision:?}");
        Some(record)
    }

    fn tap(&mut self, now_nanos: u64) -> Option<HapticPulse> {
        match self.face {
            CardFace::Video { playing } => {
                self.face = CardFace::Video { playing: !playing };
                Some(HapticPulse::LightImpact)
            }
            CardFace::Front => {
                let window = DOUBLE_TAP_WINDOW_MS * 1_000_000;
                let double = self
                    .last_tap_nanos
                    .is_some_and(|last| now_nanos.saturating_sub(last) < window);
                if !double {
                    self.last_tap_nanos = Some(now_nanos);
                    return None;
                }
                self.last_tap_nanos = None;
                let has_video = self
                    .current()
                    .is_some_and(|tutor| tutor.video_url.is_some());
                if has_video {
                    self.face = CardFace::Video { playing: true };
                    Some(HapticPulse::MediumImpact)
                } else {
                    None
                }
            }
        }
    }
}

/// Swipeable stack of tutor cards.
pub struct DiscoveryDeck {
    state: Rc<RefCell<DeckState>>,
    controller: SwipeController,
}

impl DiscoveryDeck {
    pub fn new(catalog: &dyn TutorCatalog, viewport: Size, clock: FrameClock) -> Self {
        let state = Rc::new(RefCell::new(DeckState::new(catalog.tutors())));
        let controller = SwipeController::new(SwipeConfig::card(), viewport, clock);

        for direction in Direction::ALL {
            let weak = Rc::downgrade(&state);
            controller.on_swipe(direction, move |direction| {
                record_swipe(&weak, direction)
            });
        }
        let weak = Rc::downgrade(&state);
        controller.on_tap(move || handle_tap(&weak));

        Self { state, controller }
    }

    /// Feed pointer input here.
    pub fn controller(&self) -> &SwipeController {
        &self.controller
    }

    pub fn set_haptics(&self, haptics: Rc<dyn HapticFeedback>) {
        self.controller.set_haptics(Rc::clone(&haptics));
        self.state.borrow_mut().haptics = haptics;
    }

    pub fn current(&self) -> Option<Tutor> {
        self.state.borrow().current().cloned()
    }

    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    pub fn len(&self) -> usize {
        self.state.borrow().tutors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().tutors.is_empty()
    }

    pub fn is_last(&self) -> bool {
        let state = self.state.borrow();
        state.index + 1 >= state.tutors.len()
    }

    pub fn decisions(&self) -> Vec<DecisionRecord> {
        self.state.borrow().decisions.clone()
    }

    pub fn face(&self) -> CardFace {
        self.state.borrow().face
    }

    /// Returns to the card front. False when the video was not showing.
    pub fn close_video(&self) -> bool {
        let haptics = {
            let mut state = self.state.borrow_mut();
            if state.face == CardFace::Front {
                return false;
            }
            state.face = CardFace::Front;
            Rc::clone(&state.haptics)
        };
        haptics.perform(HapticPulse::Success);
        true
    }
}

fn record_swipe(state: &Weak<RefCell<DeckState>>, direction: Direction) -> Result<(), ActionError> {
    let state = state
        .upgrade()
        .ok_or_else(|| ActionError::failed("discovery deck dropped"))?;
    let mut state = state.try_borrow_mut().map_err(|_| ActionError::Busy)?;
    state.record(SwipeDecision::from_direction(direction));
    Ok(())
}

fn handle_tap(state: &Weak<RefCell<DeckState>>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let feedback = {
        let mut state = state.borrow_mut();
        let now = state.elapsed_nanos();
        state
            .tap(now)
            .map(|pulse| (Rc::clone(&state.haptics), pulse))
    };
    if let Some((haptics, pulse)) = feedback {
        haptics.perform(pulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_state(video: bool) -> DeckState {
        let mut tutors = crate::fixtures::sample_tutors();
        if !video {
            tutors.iter_mut().for_each(|tutor| tutor.video_url = None);
        }
        DeckState::new(tutors)
    }

    #[test]
    fn decisions_map_from_directions() {
        for direction in Direction::ALL {
            assert_eq!(SwipeDecision::from_direction(direction).direction(), direction);
        }
    }

    #[test]
    fn last_card_keeps_index() {
        let mut state = deck_state(true);
        for _ in 0..7 {
            state.record(SwipeDecision::Interested);
        }
        assert_eq!(state.index, 4);
        assert_eq!(state.decisions.len(), 7);
        assert!(state
            .decisions
            .iter()
            .skip(4)
            .all(|record| record.tutor == TutorId(5)));
    }

    #[test]
    fn double_tap_window() {
        let mut state = deck_state(true);
        assert_eq!(state.tap(0), None);
        assert_eq!(state.tap(400_000_000), None);
        assert_eq!(state.face, CardFace::Front);
        assert_eq!(state.tap(500_000_000), Some(HapticPulse::MediumImpact));
        assert_eq!(state.face, CardFace::Video { playing: true });
        assert_eq!(state.tap(510_000_000), Some(HapticPulse::LightImpact));
        assert_eq!(state.face, CardFace::Video { playing: false });
    }

    #[test]
    fn double_tap_without_video_stays_on_front() {
        let mut state = deck_state(false);
        state.tap(0);
        assert_eq!(state.tap(1), None);
        assert_eq!(state.face, CardFace::Front);
    }
}
