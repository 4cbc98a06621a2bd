//! Capability traits for the third-party SDKs the screens drive.
//!
//! Both are synchronous from the screen's point of view; an SDK binding
//! that is asynchronous underneath resolves before returning.

use tutorswipe_core::collections::map::HashSet;

use crate::error::ServiceError;

/// Minutes of inactivity before the video SDK ends a session.
pub const SESSION_IDLE_TIMEOUT_MINS: u32 = 40;

/// Display name used when the user has not set one.
pub const DEFAULT_USER_NAME: &str = "Student";

/// Entitlement that unlocks premium features.
pub const PREMIUM_ENTITLEMENT: &str = "premium";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub session_name: String,
    pub session_password: String,
    pub token: String,
    pub user_name: String,
    pub idle_timeout_mins: u32,
    pub connect_audio: bool,
    pub start_muted: bool,
    pub local_video_on: bool,
}

impl SessionOptions {
    pub fn new(session_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            session_password: String::new(),
            token: token.into(),
            user_name: DEFAULT_USER_NAME.to_string(),
            idle_timeout_mins: SESSION_IDLE_TIMEOUT_MINS,
            connect_audio: true,
            start_muted: false,
            local_video_on: true,
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.session_password = password.into();
        self
    }
}

/// Video calling SDK.
pub trait VideoSessionProvider {
    fn join(&self, options: &SessionOptions) -> Result<(), ServiceError>;

    fn leave(&self) -> Result<(), ServiceError>;

    fn set_audio_muted(&self, muted: bool) -> Result<(), ServiceError>;

    fn set_local_video(&self, on: bool) -> Result<(), ServiceError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub identifier: String,
    pub title: String,
    /// Store-formatted price, e.g. "$9.99".
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Offering {
    pub identifier: String,
    pub packages: Vec<Package>,
}

impl Offering {
    pub fn package(&self, identifier: &str) -> Option<&Package> {
        self.packages
            .iter()
            .find(|package| package.identifier == identifier)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub active_entitlements: HashSet<String>,
}

impl CustomerInfo {
    pub fn with_entitlement(mut self, entitlement: impl Into<String>) -> Self {
        self.active_entitlements.insert(entitlement.into());
        self
    }

    pub fn has_entitlement(&self, entitlement: &str) -> bool {
        self.active_entitlements.contains(entitlement)
    }

    pub fn is_premium(&self) -> bool {
        self.has_entitlement(PREMIUM_ENTITLEMENT)
    }
}

/// In-app purchase SDK.
pub trait BillingProvider {
    fn customer_info(&self) -> Result<CustomerInfo, ServiceError>;

    /// The current offering, if the store has one configured.
    fn current_offering(&self) -> Result<Option<Offering>, ServiceError>;

    fn purchase(&self, package: &Package) -> Result<CustomerInfo, ServiceError>;

    fn restore(&self) -> Result<CustomerInfo, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_defaults() {
        let options = SessionOptions::new("algebra-101", "jwt");
        assert_eq!(options.user_name, "Student");
        assert_eq!(options.idle_timeout_mins, 40);
        assert!(options.connect_audio);
        assert!(!options.start_muted);
        assert!(options.local_video_on);
        assert!(options.session_password.is_empty());
    }

    #[test]
    fn premium_is_an_entitlement() {
        assert!(!CustomerInfo::default().is_premium());
        assert!(CustomerInfo::default()
            .with_entitlement(PREMIUM_ENTITLEMENT)
            .is_premium());
        assert!(!CustomerInfo::default().with_entitlement("pro").is_premium());
    }
}
