//! In-process stores behind the screens.

use std::cell::RefCell;

use tutorswipe_core::collections::map::HashMap;

use crate::error::RepositoryError;
use crate::model::{Chat, ChatId, Tutor, TutorId};

/// Conversation list with explicit mutations.
pub trait ChatRepository {
    /// All chats in display order.
    fn chats(&self) -> Vec<Chat>;

    fn chat(&self, id: ChatId) -> Result<Chat, RepositoryError>;

    /// Flips the unread flag and returns its new value.
    fn toggle_read(&self, id: ChatId) -> Result<bool, RepositoryError>;

    /// Flips the muted flag and returns its new value.
    fn toggle_mute(&self, id: ChatId) -> Result<bool, RepositoryError>;
}

/// Ordered chats plus an id index.
#[derive(Default)]
pub struct InMemoryChatStore {
    chats: RefCell<Vec<Chat>>,
    index: RefCell<HashMap<ChatId, usize>>,
}

impl InMemoryChatStore {
    pub fn new(chats: Vec<Chat>) -> Self {
        let index = chats
            .iter()
            .enumerate()
            .map(|(position, chat)| (chat.id, position))
            .collect();
        Self {
            chats: RefCell::new(chats),
            index: RefCell::new(index),
        }
    }

    /// Adds `chat` at the end of the list, or replaces the chat with the
    /// same id in place.
    pub fn insert(&self, chat: Chat) {
        let id = chat.id;
        let mut chats = self.chats.borrow_mut();
        let mut index = self.index.borrow_mut();
        let existing = index.get(&id).copied();
        match existing {
            Some(position) => chats[position] = chat,
            None => {
                index.insert(id, chats.len());
                chats.push(chat);
            }
        }
        log::debug!("chat {id} stored");
    }

    fn update<R>(
        &self,
        id: ChatId,
        f: impl FnOnce(&mut Chat) -> R,
    ) -> Result<R, RepositoryError> {
        let position = *self
            .index
            .borrow()
            .get(&id)
            .ok_or(RepositoryError::UnknownChat { id })?;
        let mut chats = self.chats.borrow_mut();
        let chat = chats
            .get_mut(position)
            .ok_or(RepositoryError::UnknownChat { id })?;
        Ok(f(chat))
    }
}

impl ChatRepository for InMemoryChatStore {
    fn chats(&self) -> Vec<Chat> {
        self.chats.borrow().clone()
    }

    fn chat(&self, id: ChatId) -> Result<Chat, RepositoryError> {
        self.update(id, |chat| chat.clone())
    }

    fn toggle_read(&self, id: ChatId) -> Result<bool, RepositoryError> {
        let unread = self.update(id, |chat| {
            chat.unread = !chat.unread;
            chat.unread
        })?;
        log::debug!("chat {id} unread -> {unread}");
        Ok(unread)
    }

    fn toggle_mute(&self, id: ChatId) -> Result<bool, RepositoryError> {
        let muted = self.update(id, |chat| {
            chat.muted = !chat.muted;
            chat.muted
        })?;
        log::debug!("chat {id} muted -> {muted}");
        Ok(muted)
    }
}

/// Source of discovery candidates.
pub trait TutorCatalog {
    fn tutors(&self) -> Vec<Tutor>;

    fn tutor(&self, id: TutorId) -> Result<Tutor, RepositoryError> {
        self.tutors()
            .into_iter()
            .find(|tutor| tutor.id == id)
            .ok_or(RepositoryError::UnknownTutor { id })
    }
}

/// Fixed tutor list.
#[derive(Clone, Debug, Default)]
pub struct StaticTutorCatalog {
    tutors: Vec<Tutor>,
}

impl StaticTutorCatalog {
    pub fn new(tutors: Vec<Tutor>) -> Self {
        Self { tutors }
    }
}

impl TutorCatalog for StaticTutorCatalog {
    fn tutors(&self) -> Vec<Tutor> {
        self.tutors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn toggles_flip_flags_in_place() {
        let store = InMemoryChatStore::new(fixtures::sample_chats());
        let id = ChatId(1);
        assert!(store.chat(id).unwrap().unread);
        assert_eq!(store.toggle_read(id), Ok(false));
        assert_eq!(store.toggle_mute(id), Ok(true));
        let chat = store.chat(id).unwrap();
        assert!(!chat.unread);
        assert!(chat.muted);
        // Order is preserved.
        assert_eq!(store.chats()[0].id, id);
    }

    #[test]
    fn unknown_chat_is_an_error() {
        let store = InMemoryChatStore::new(fixtures::sample_chats());
        assert_eq!(
            store.toggle_read(ChatId(99)),
            Err(RepositoryError::UnknownChat { id: ChatId(99) })
        );
    }

    #[test]
    fn insert_appends_or_replaces() {
        let store = InMemoryChatStore::new(fixtures::sample_chats());
        let mut chat = store.chat(ChatId(2)).unwrap();
        chat.unread = true;
        store.insert(chat);
        assert!(store.chat(ChatId(2)).unwrap().unread);
        assert_eq!(store.chats().len(), 4);

        chat = store.chat(ChatId(4)).unwrap();
        chat.id = ChatId(5);
        store.insert(chat);
        assert_eq!(store.chats().len(), 5);
        assert_eq!(store.chats()[4].id, ChatId(5));
        assert_eq!(store.toggle_mute(ChatId(5)), Ok(true));
    }

    #[test]
    fn catalog_lookup_by_id() {
        let catalog = StaticTutorCatalog::new(fixtures::sample_tutors());
        assert_eq!(catalog.tutor(TutorId(4)).unwrap().name, "David Kim");
        assert!(catalog.tutor(TutorId(42)).is_err());
    }
}
