//! Mock capability providers.

use std::cell::{Cell, RefCell};

use tutorswipe_app::{
    BillingProvider, CustomerInfo, Offering, Package, ServiceError, SessionOptions,
    VideoSessionProvider, PREMIUM_ENTITLEMENT,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoCall {
    Join(SessionOptions),
    Leave,
    AudioMuted(bool),
    LocalVideo(bool),
}

/// Video provider that records every call.
#[derive(Default)]
pub struct MockVideoProvider {
    calls: RefCell<Vec<VideoCall>>,
    fail_join: Cell<bool>,
}

impl MockVideoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose joins are refused.
    pub fn refusing() -> Self {
        let provider = Self::default();
        provider.fail_join.set(true);
        provider
    }

    pub fn set_fail_join(&self, fail: bool) {
        self.fail_join.set(fail);
    }

    pub fn calls(&self) -> Vec<VideoCall> {
        self.calls.borrow().clone()
    }
}

impl VideoSessionProvider for MockVideoProvider {
    fn join(&self, options: &SessionOptions) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(VideoCall::Join(options.clone()));
        if self.fail_join.get() {
            return Err(ServiceError::Unavailable {
                service: "video",
                reason: "join refused".to_string(),
            });
        }
        Ok(())
    }

    fn leave(&self) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(VideoCall::Leave);
        Ok(())
    }

    fn set_audio_muted(&self, muted: bool) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(VideoCall::AudioMuted(muted));
        Ok(())
    }

    fn set_local_video(&self, on: bool) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(VideoCall::LocalVideo(on));
        Ok(())
    }
}

/// What the mock store does when asked to purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PurchaseBehavior {
    #[default]
    GrantPremium,
    Cancel,
    Decline,
    /// Succeeds without unlocking the entitlement.
    NoEntitlement,
}

pub struct MockBillingProvider {
    customer: RefCell<CustomerInfo>,
    offering: Option<Offering>,
    behavior: PurchaseBehavior,
    restorable: bool,
    purchases: RefCell<Vec<String>>,
}

impl MockBillingProvider {
    pub fn new(offering: Option<Offering>) -> Self {
        Self {
            customer: RefCell::new(CustomerInfo::default()),
            offering,
            behavior: PurchaseBehavior::default(),
            restorable: false,
            purchases: RefCell::new(Vec::new()),
        }
    }

    pub fn with_behavior(mut self, behavior: PurchaseBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// `restore` unlocks premium, as for a user who bought on another device.
    pub fn with_restorable_premium(mut self) -> Self {
        self.restorable = true;
        self
    }

    pub fn with_customer(self, customer: CustomerInfo) -> Self {
        *self.customer.borrow_mut() = customer;
        self
    }

    /// Identifiers of every attempted purchase.
    pub fn purchases(&self) -> Vec<String> {
        self.purchases.borrow().clone()
    }

    fn grant_premium(&self) -> CustomerInfo {
        let mut customer = self.customer.borrow_mut();
        customer
            .active_entitlements
            .insert(PREMIUM_ENTITLEMENT.to_string());
        customer.clone()
    }
}

impl BillingProvider for MockBillingProvider {
    fn customer_info(&self) -> Result<CustomerInfo, ServiceError> {
        Ok(self.customer.borrow().clone())
    }

    fn current_offering(&self) -> Result<Option<Offering>, ServiceError> {
        Ok(self.offering.clone())
    }

    fn purchase(&self, package: &Package) -> Result<CustomerInfo, ServiceError> {
        self.purchases
            .borrow_mut()
            .push(package.identifier.clone());
        match self.behavior {
            PurchaseBehavior::GrantPremium => Ok(self.grant_premium()),
            PurchaseBehavior::Cancel => Err(ServiceError::Cancelled),
            PurchaseBehavior::Decline => Err(ServiceError::Rejected {
                reason: "payment declined".to_string(),
            }),
            PurchaseBehavior::NoEntitlement => Ok(self.customer.borrow().clone()),
        }
    }

    fn restore(&self) -> Result<CustomerInfo, ServiceError> {
        if self.restorable {
            Ok(self.grant_premium())
        } else {
            Ok(self.customer.borrow().clone())
        }
    }
}
