//! Screen state for tutorswipe.
//!
//! Everything here is plain state over injected repositories and
//! capability traits; the gesture work is delegated to
//! `tutorswipe-foundation` controllers.

pub mod calling;
pub mod discovery;
pub mod error;
pub mod fixtures;
pub mod inbox;
pub mod model;
pub mod premium;
pub mod repository;
pub mod services;

pub use calling::CallScreen;
pub use discovery::{CardFace, DecisionRecord, DiscoveryDeck, SwipeDecision, DOUBLE_TAP_WINDOW_MS};
pub use error::{RepositoryError, ServiceError};
pub use inbox::{Inbox, ProcessingFlag};
pub use model::{Chat, ChatId, Tutor, TutorId};
pub use premium::PremiumScreen;
pub use repository::{ChatRepository, InMemoryChatStore, StaticTutorCatalog, TutorCatalog};
pub use services::{
    BillingProvider, CustomerInfo, Offering, Package, SessionOptions, VideoSessionProvider,
    PREMIUM_ENTITLEMENT,
};
