//! Drives the discovery deck and the inbox with scripted pointer input on a
//! manual 60Hz clock and logs what each screen does.

use std::rc::Rc;

use tutorswipe_app::fixtures;
use tutorswipe_app::{
    ChatId, ChatRepository, DiscoveryDeck, InMemoryChatStore, Inbox, StaticTutorCatalog,
};
use tutorswipe_core::{Runtime, FRAME_NANOS_60HZ};
use tutorswipe_foundation::{
    GestureSample, HapticFeedback, HapticPulse, ReleaseOutcome, SwipeController,
};
use tutorswipe_ui_graphics::Size;

const VIEWPORT: Size = Size::new(390.0, 844.0);
const DRAG_STEPS: usize = 10;
const MAX_FRAMES: usize = 600;

struct LogHaptics;

impl HapticFeedback for LogHaptics {
    fn perform(&self, pulse: HapticPulse) {
        log::info!("haptic {pulse:?}");
    }
}

struct Host {
    runtime: Runtime,
    now_nanos: u64,
}

impl Host {
    fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            now_nanos: 0,
        }
    }

    fn frame(&mut self) {
        self.now_nanos += FRAME_NANOS_60HZ;
        self.runtime.handle().drain_frame_callbacks(self.now_nanos);
    }

    fn settle(&mut self) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() && frames < MAX_FRAMES {
            self.frame();
            frames += 1;
        }
        frames
    }

    /// One drag step per frame, then release with `velocity` px/ms.
    fn swipe(
        &mut self,
        controller: &SwipeController,
        dx: f32,
        dy: f32,
        velocity: (f32, f32),
    ) -> Option<ReleaseOutcome> {
        if !controller.gesture_start() {
            log::warn!("gesture ignored, surface is busy");
            return None;
        }
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            controller.move_to(GestureSample::at(dx * t, dy * t));
            self.frame();
        }
        controller.move_to(GestureSample::new(dx, dy, velocity.0, velocity.1));
        let outcome = controller.release();
        let frames = self.settle();
        log::info!("swipe ({dx}, {dy}) -> {outcome:?}, settled in {frames} frames");
        outcome
    }

    fn tap(&mut self, controller: &SwipeController) {
        if controller.gesture_start() {
            controller.move_to(GestureSample::at(1.0, 1.0));
            controller.release();
        }
        self.frame();
    }
}

fn discovery(host: &mut Host) {
    let catalog = StaticTutorCatalog::new(fixtures::sample_tutors());
    let deck = DiscoveryDeck::new(&catalog, VIEWPORT, host.runtime.frame_clock());
    deck.set_haptics(Rc::new(LogHaptics));
    let card = deck.controller();

    host.swipe(card, 180.0, 12.0, (0.0, 0.0));
    host.swipe(card, -60.0, 4.0, (-1.2, 0.0));
    host.swipe(card, 30.0, -10.0, (0.0, 0.0));
    host.swipe(card, 8.0, -220.0, (0.0, 0.0));

    host.tap(card);
    host.tap(card);
    log::info!("card face after double tap: {:?}", deck.face());
    deck.close_video();

    for record in deck.decisions() {
        log::info!("tutor {} -> {:?}", record.tutor, record.decision);
    }
    if let Some(tutor) = deck.current() {
        log::info!("now showing {} ({} of {})", tutor.name, deck.index() + 1, deck.len());
    }
}

fn inbox(host: &mut Host) {
    let store: Rc<dyn ChatRepository> = Rc::new(InMemoryChatStore::new(fixtures::sample_chats()));
    let mut inbox = Inbox::new(store, VIEWPORT, host.runtime.frame_clock());
    inbox.set_haptics(Rc::new(LogHaptics));

    if let Some(row) = inbox.row(ChatId(1)) {
        host.swipe(row, 140.0, 6.0, (0.0, 0.0));
    }
    if let Some(row) = inbox.row(ChatId(2)) {
        host.swipe(row, -140.0, 0.0, (0.0, 0.0));
    }

    match inbox.open_options(ChatId(3)) {
        Ok(true) => {
            if let Err(err) = inbox.toggle_selected_mute() {
                log::warn!("options sheet: {err}");
            }
        }
        Ok(false) => log::info!("options sheet busy"),
        Err(err) => log::warn!("options sheet: {err}"),
    }

    for chat in inbox.chats() {
        log::info!(
            "{} {}: unread={} muted={}",
            chat.id,
            chat.name,
            chat.unread,
            chat.muted
        );
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut host = Host::new();
    discovery(&mut host);
    inbox(&mut host);
}
