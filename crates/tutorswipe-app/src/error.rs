use std::fmt;

use tutorswipe_foundation::ActionError;

use crate::model::{ChatId, TutorId};

/// Failure reported by an external capability (video SDK, billing SDK).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Unavailable {
        service: &'static str,
        reason: String,
    },
    Rejected {
        reason: String,
    },
    /// The user backed out; not worth surfacing as an alert.
    Cancelled,
    InvalidRequest {
        reason: &'static str,
    },
    NotInSession,
    AlreadyInSession {
        session_name: String,
    },
    UnknownPackage {
        identifier: String,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unavailable { service, reason } => {
                write!(f, "{service} unavailable: {reason}")
            }
            ServiceError::Rejected { reason } => write!(f, "request rejected: {reason}"),
            ServiceError::Cancelled => write!(f, "cancelled by user"),
            ServiceError::InvalidRequest { reason } => write!(f, "invalid request: {reason}"),
            ServiceError::NotInSession => write!(f, "not in a call session"),
            ServiceError::AlreadyInSession { session_name } => {
                write!(f, "already in session {session_name}")
            }
            ServiceError::UnknownPackage { identifier } => {
                write!(f, "package {identifier} is not offered")
            }
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    UnknownChat { id: ChatId },
    UnknownTutor { id: TutorId },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::UnknownChat { id } => write!(f, "chat {id} not found"),
            RepositoryError::UnknownTutor { id } => write!(f, "tutor {id} not found"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<RepositoryError> for ActionError {
    fn from(err: RepositoryError) -> Self {
        ActionError::failed(err.to_string())
    }
}
