use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TutorId(pub u32);

impl fmt::Display for TutorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub u32);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tutor profile shown on the discovery card.
#[derive(Clone, Debug, PartialEq)]
pub struct Tutor {
    pub id: TutorId,
    pub name: String,
    pub bio: String,
    pub rating: f32,
    pub photo_url: String,
    /// Intro video revealed by a double tap.
    pub video_url: Option<String>,
}

/// One inbox conversation row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
    pub last_message: String,
    pub unread: bool,
    pub muted: bool,
}
