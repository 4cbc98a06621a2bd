//! Inbox list: each row swipes right to toggle read and left to toggle
//! mute, and a long press opens an options sheet with the same actions.

use std::cell::Cell;
use std::rc::Rc;

use tutorswipe_core::FrameClock;
use tutorswipe_foundation::{ActionError, Direction, HapticFeedback, SwipeConfig, SwipeController};
use tutorswipe_ui_graphics::Size;

use crate::error::RepositoryError;
use crate::model::{Chat, ChatId};
use crate::repository::ChatRepository;

/// Inbox-wide busy flag. While set, row swipes snap back and the options
/// sheet refuses to open.
#[derive(Clone, Default)]
pub struct ProcessingFlag(Rc<Cell<bool>>);

impl ProcessingFlag {
    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, processing: bool) {
        self.0.set(processing);
    }

    /// Runs `f` with the flag held, or fails with `Busy` when already set.
    fn run<R>(&self, f: impl FnOnce() -> R) -> Result<R, ActionError> {
        if self.0.replace(true) {
            return Err(ActionError::Busy);
        }
        let result = f();
        self.0.set(false);
        Ok(result)
    }
}

struct Row {
    chat: ChatId,
    controller: SwipeController,
}

/// Chat list screen. Rows mirror the repository as of construction or the
/// last [`Inbox::refresh`].
pub struct Inbox {
    repository: Rc<dyn ChatRepository>,
    rows: Vec<Row>,
    config: SwipeConfig,
    viewport: Size,
    clock: FrameClock,
    haptics: Option<Rc<dyn HapticFeedback>>,
    processing: ProcessingFlag,
    selected: Option<ChatId>,
}

impl Inbox {
    pub fn new(repository: Rc<dyn ChatRepository>, viewport: Size, clock: FrameClock) -> Self {
        let mut inbox = Self {
            repository,
            rows: Vec::new(),
            config: SwipeConfig::list_row(viewport),
            viewport,
            clock,
            haptics: None,
            processing: ProcessingFlag::default(),
            selected: None,
        };
        inbox.refresh();
        inbox
    }

    /// Re-reads the chat list. Rows of chats still present keep their
    /// controllers (and any running animation); new chats get fresh rows,
    /// removed ones are dropped.
    pub fn refresh(&mut self) {
        let mut previous = std::mem::take(&mut self.rows);
        let rows: Vec<Row> = self
            .repository
            .chats()
            .into_iter()
            .map(|chat| match previous.iter().position(|row| row.chat == chat.id) {
                Some(position) => previous.swap_remove(position),
                None => Row {
                    chat: chat.id,
                    controller: self.row_controller(chat.id),
                },
            })
            .collect();
        self.rows = rows;
        log::debug!("inbox rows: {}", self.rows.len());
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.repository.chats()
    }

    pub fn chat(&self, id: ChatId) -> Result<Chat, RepositoryError> {
        self.repository.chat(id)
    }

    /// Swipe controller of the row showing `id`.
    pub fn row(&self, id: ChatId) -> Option<&SwipeController> {
        self.rows
            .iter()
            .find(|row| row.chat == id)
            .map(|row| &row.controller)
    }

    pub fn set_haptics(&mut self, haptics: Rc<dyn HapticFeedback>) {
        for row in &self.rows {
            row.controller.set_haptics(Rc::clone(&haptics));
        }
        self.haptics = Some(haptics);
    }

    pub fn is_processing(&self) -> bool {
        self.processing.get()
    }

    /// Holds the busy flag on behalf of the caller, e.g. while a previous
    /// change is still being applied elsewhere.
    pub fn set_processing(&self, processing: bool) {
        self.processing.set(processing);
    }

    pub fn processing_flag(&self) -> ProcessingFlag {
        self.processing.clone()
    }

    /// Long press on a row. Returns false while processing.
    pub fn open_options(&mut self, id: ChatId) -> Result<bool, RepositoryError> {
        if self.processing.get() {
            log::debug!("options for chat {id} ignored while processing");
            return Ok(false);
        }
        self.repository.chat(id)?;
        self.selected = Some(id);
        Ok(true)
    }

    pub fn selected(&self) -> Option<Chat> {
        self.selected.and_then(|id| self.repository.chat(id).ok())
    }

    pub fn close_options(&mut self) {
        self.selected = None;
    }

    /// Toggles read on the selected chat and closes the sheet.
    pub fn mark_selected_read(&mut self) -> Result<(), ActionError> {
        self.apply_to_selected(|repository, id| repository.toggle_read(id))
    }

    /// Toggles mute on the selected chat and closes the sheet.
    pub fn toggle_selected_mute(&mut self) -> Result<(), ActionError> {
        self.apply_to_selected(|repository, id| repository.toggle_mute(id))
    }

    fn apply_to_selected(
        &mut self,
        action: impl FnOnce(&dyn ChatRepository, ChatId) -> Result<bool, RepositoryError>,
    ) -> Result<(), ActionError> {
        let Some(id) = self.selected.take() else {
            return Ok(());
        };
        let repository = Rc::clone(&self.repository);
        self.processing
            .run(|| action(repository.as_ref(), id))??;
        Ok(())
    }

    fn row_controller(&self, chat: ChatId) -> SwipeController {
        let controller =
            SwipeController::new(self.config.clone(), self.viewport, self.clock.clone());
        if let Some(haptics) = &self.haptics {
            controller.set_haptics(Rc::clone(haptics));
        }

        let guard = self.processing.clone();
        controller.set_commit_guard(move || guard.get());

        for direction in [Direction::Right, Direction::Left] {
            let repository = Rc::clone(&self.repository);
            let processing = self.processing.clone();
            controller.on_swipe(direction, move |direction| {
                processing.run(|| match direction {
                    Direction::Left => repository.toggle_mute(chat),
                    _ => repository.toggle_read(chat),
                })??;
                Ok(())
            });
        }
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_flag_rejects_reentry() {
        let flag = ProcessingFlag::default();
        let nested = flag.run(|| flag.run(|| ()));
        assert_eq!(nested, Ok(Err(ActionError::Busy)));
        assert!(!flag.get());
    }
}
