//! Video call screen state over a [`VideoSessionProvider`].

use crate::error::ServiceError;
use crate::services::{SessionOptions, VideoSessionProvider};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ActiveSession {
    name: String,
    audio_muted: bool,
    video_on: bool,
}

pub struct CallScreen<P: VideoSessionProvider> {
    provider: P,
    user_name: Option<String>,
    session: Option<ActiveSession>,
}

impl<P: VideoSessionProvider> CallScreen<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            user_name: None,
            session: None,
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn join(&mut self, session_name: &str, token: &str) -> Result<(), ServiceError> {
        if let Some(session) = &self.session {
            return Err(ServiceError::AlreadyInSession {
                session_name: session.name.clone(),
            });
        }
        let session_name = session_name.trim();
        if session_name.is_empty() {
            return Err(ServiceError::InvalidRequest {
                reason: "session name is empty",
            });
        }
        if token.is_empty() {
            return Err(ServiceError::InvalidRequest {
                reason: "session token is empty",
            });
        }

        let mut options = SessionOptions::new(session_name, token);
        if let Some(user_name) = &self.user_name {
            options = options.with_user_name(user_name.clone());
        }
        if let Err(err) = self.provider.join(&options) {
            log::warn!("failed to join session {session_name}: {err}");
            return Err(err);
        }
        log::info!("joined session {session_name}");
        self.session = Some(ActiveSession {
            name: session_name.to_string(),
            audio_muted: options.start_muted,
            video_on: options.local_video_on,
        });
        Ok(())
    }

    pub fn leave(&mut self) -> Result<(), ServiceError> {
        let Some(session) = &self.session else {
            return Err(ServiceError::NotInSession);
        };
        let name = session.name.clone();
        self.provider.leave()?;
        self.session = None;
        log::info!("left session {name}");
        Ok(())
    }

    /// Returns the new muted state.
    pub fn toggle_mute(&mut self) -> Result<bool, ServiceError> {
        let session = self.session.as_mut().ok_or(ServiceError::NotInSession)?;
        let muted = !session.audio_muted;
        self.provider.set_audio_muted(muted)?;
        session.audio_muted = muted;
        Ok(muted)
    }

    /// Returns whether local video is now on.
    pub fn toggle_camera(&mut self) -> Result<bool, ServiceError> {
        let session = self.session.as_mut().ok_or(ServiceError::NotInSession)?;
        let on = !session.video_on;
        self.provider.set_local_video(on)?;
        session.video_on = on;
        Ok(on)
    }

    pub fn is_in_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_name(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.name.as_str())
    }

    pub fn is_muted(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.audio_muted)
    }

    pub fn is_video_on(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.video_on)
    }
}
