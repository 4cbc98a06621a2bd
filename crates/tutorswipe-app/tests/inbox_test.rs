use std::rc::Rc;

use tutorswipe_app::fixtures;
use tutorswipe_app::{ChatId, ChatRepository, InMemoryChatStore, Inbox, RepositoryError};
use tutorswipe_foundation::{ActionError, Direction, HapticPulse, ReleaseOutcome, SwipePhase};
use tutorswipe_testing::{gestures, FrameDriver, RecordingHaptics};
use tutorswipe_ui_graphics::{Point, Size};

const PHONE: Size = Size::new(400.0, 800.0);

fn inbox(driver: &FrameDriver) -> (Inbox, Rc<InMemoryChatStore>) {
    let store = Rc::new(InMemoryChatStore::new(fixtures::sample_chats()));
    let repository: Rc<dyn ChatRepository> = store.clone();
    (Inbox::new(repository, PHONE, driver.clock()), store)
}

#[test]
fn swipe_right_toggles_read() {
    let mut driver = FrameDriver::new();
    let (inbox, store) = inbox(&driver);
    let id = ChatId(1);
    let row = inbox.row(id).unwrap();

    assert_eq!(
        gestures::swipe(row, 0.2 * PHONE.width, 0.0),
        Some(ReleaseOutcome::Commit(Direction::Right))
    );
    let chat = store.chat(id).unwrap();
    assert!(!chat.unread);
    assert!(!chat.muted);

    driver.run_until_idle();
    assert_eq!(row.phase(), SwipePhase::Idle);
    assert_eq!(row.offset(), Point::ZERO);
}

#[test]
fn swipe_left_toggles_mute_once() {
    let mut driver = FrameDriver::new();
    let (inbox, store) = inbox(&driver);
    let id = ChatId(3);
    let before = store.chat(id).unwrap();

    gestures::swipe(inbox.row(id).unwrap(), -0.2 * PHONE.width, 0.0);
    driver.run_until_idle();

    let after = store.chat(id).unwrap();
    assert_eq!(after.muted, !before.muted);
    assert_eq!(after.unread, before.unread);
    assert!(!inbox.is_processing());
}

#[test]
fn short_swipe_changes_nothing() {
    let mut driver = FrameDriver::new();
    let (inbox, store) = inbox(&driver);
    let before = store.chats();

    gestures::swipe(inbox.row(ChatId(2)).unwrap(), 0.1 * PHONE.width, 0.0);
    driver.run_until_idle();
    assert_eq!(store.chats(), before);
}

#[test]
fn rows_are_independent() {
    let mut driver = FrameDriver::new();
    let (inbox, store) = inbox(&driver);

    gestures::swipe(inbox.row(ChatId(2)).unwrap(), -100.0, 0.0);
    gestures::swipe(inbox.row(ChatId(4)).unwrap(), 100.0, 0.0);
    driver.run_until_idle();

    let chats = store.chats();
    assert!(chats[1].muted);
    assert!(chats[3].unread);
    assert_eq!(chats[0], fixtures::sample_chats()[0]);
    assert_eq!(chats[2], fixtures::sample_chats()[2]);
}

#[test]
fn processing_blocks_swipes_and_options() {
    let mut driver = FrameDriver::new();
    let (mut inbox, store) = inbox(&driver);
    let id = ChatId(1);
    let before = store.chat(id).unwrap();

    inbox.set_processing(true);
    assert_eq!(
        gestures::swipe(inbox.row(id).unwrap(), -120.0, 0.0),
        Some(ReleaseOutcome::SnapBack)
    );
    driver.run_until_idle();
    assert_eq!(store.chat(id).unwrap(), before);
    assert_eq!(inbox.open_options(id), Ok(false));
    assert_eq!(inbox.selected(), None);

    inbox.set_processing(false);
    gestures::swipe(inbox.row(id).unwrap(), -120.0, 0.0);
    driver.run_until_idle();
    assert!(store.chat(id).unwrap().muted);
}

#[test]
fn options_sheet_toggles_selected_chat() {
    let driver = FrameDriver::new();
    let (mut inbox, store) = inbox(&driver);
    let id = ChatId(2);

    assert_eq!(inbox.open_options(id), Ok(true));
    assert_eq!(inbox.selected().map(|chat| chat.id), Some(id));
    assert_eq!(inbox.mark_selected_read(), Ok(()));
    assert!(store.chat(id).unwrap().unread);
    assert_eq!(inbox.selected(), None);

    inbox.open_options(id).unwrap();
    inbox.toggle_selected_mute().unwrap();
    assert!(store.chat(id).unwrap().muted);

    // Nothing selected: no-op.
    assert_eq!(inbox.toggle_selected_mute(), Ok(()));
    assert!(store.chat(id).unwrap().muted);

    inbox.open_options(id).unwrap();
    inbox.close_options();
    assert_eq!(inbox.selected(), None);
}

#[test]
fn options_sheet_rejects_unknown_chat() {
    let driver = FrameDriver::new();
    let (mut inbox, _store) = inbox(&driver);
    assert_eq!(
        inbox.open_options(ChatId(77)),
        Err(RepositoryError::UnknownChat { id: ChatId(77) })
    );
}

#[test]
fn sheet_action_while_processing_is_busy_and_closes() {
    let driver = FrameDriver::new();
    let (mut inbox, store) = inbox(&driver);
    let id = ChatId(4);

    inbox.open_options(id).unwrap();
    inbox.set_processing(true);
    assert_eq!(inbox.mark_selected_read(), Err(ActionError::Busy));
    assert_eq!(inbox.selected(), None);
    assert!(!store.chat(id).unwrap().unread);
}

#[test]
fn row_haptics() {
    let mut driver = FrameDriver::new();
    let (mut inbox, _store) = inbox(&driver);
    let haptics = RecordingHaptics::new();
    inbox.set_haptics(haptics.handle());

    gestures::swipe(inbox.row(ChatId(1)).unwrap(), -90.0, 0.0);
    driver.run_until_idle();
    assert_eq!(
        haptics.pulses(),
        vec![HapticPulse::LightImpact, HapticPulse::MediumImpact]
    );
}

#[test]
fn refresh_adds_rows_for_new_chats() {
    let mut driver = FrameDriver::new();
    let (mut inbox, store) = inbox(&driver);
    let haptics = RecordingHaptics::new();
    inbox.set_haptics(haptics.handle());
    let kept = inbox.row(ChatId(1)).unwrap().clone();
    assert!(kept.set_offset(Point::new(12.0, 0.0)));

    let mut chat = store.chat(ChatId(4)).unwrap();
    chat.id = ChatId(5);
    chat.name = "Olivia Park".to_string();
    store.insert(chat);
    assert!(inbox.row(ChatId(5)).is_none());

    inbox.refresh();
    assert_eq!(inbox.chats().len(), 5);
    assert_eq!(inbox.row(ChatId(1)).unwrap().offset(), Point::new(12.0, 0.0));

    let row = inbox.row(ChatId(5)).unwrap();
    assert_eq!(
        gestures::swipe(row, 100.0, 0.0),
        Some(ReleaseOutcome::Commit(Direction::Right))
    );
    driver.run_until_idle();
    assert!(store.chat(ChatId(5)).unwrap().unread);
    assert_eq!(haptics.count(HapticPulse::MediumImpact), 1);
}
