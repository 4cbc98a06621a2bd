//! Premium upgrade screen over a [`BillingProvider`].

use crate::error::ServiceError;
use crate::services::{BillingProvider, CustomerInfo, Offering, Package};

pub struct PremiumScreen<B: BillingProvider> {
    billing: B,
    customer: Option<CustomerInfo>,
    offering: Option<Offering>,
}

impl<B: BillingProvider> PremiumScreen<B> {
    pub fn new(billing: B) -> Self {
        Self {
            billing,
            customer: None,
            offering: None,
        }
    }

    pub fn billing(&self) -> &B {
        &self.billing
    }

    /// Fetches the customer record and the current offering.
    pub fn load(&mut self) -> Result<(), ServiceError> {
        self.customer = Some(self.billing.customer_info()?);
        self.offering = self.billing.current_offering()?;
        log::debug!(
            "premium screen loaded with {} packages",
            self.packages().len()
        );
        Ok(())
    }

    pub fn is_premium(&self) -> bool {
        self.customer
            .as_ref()
            .is_some_and(CustomerInfo::is_premium)
    }

    pub fn packages(&self) -> &[Package] {
        self.offering
            .as_ref()
            .map(|offering| offering.packages.as_slice())
            .unwrap_or_default()
    }

    /// Buys `identifier` from the loaded offering. `Ok(false)` when the user
    /// cancels or the purchase did not unlock premium.
    pub fn purchase(&mut self, identifier: &str) -> Result<bool, ServiceError> {
        let package = self
            .offering
            .as_ref()
            .and_then(|offering| offering.package(identifier))
            .cloned()
            .ok_or_else(|| ServiceError::UnknownPackage {
                identifier: identifier.to_string(),
            })?;

        match self.billing.purchase(&package) {
            Ok(customer) => Ok(self.apply(customer)),
            Err(ServiceError::Cancelled) => {
                log::debug!("purchase of {identifier} cancelled");
                Ok(false)
            }
            Err(err) => {
                log::warn!("purchase of {identifier} failed: {err}");
                Err(err)
            }
        }
    }

    /// `Ok(false)` when there was nothing to restore.
    pub fn restore(&mut self) -> Result<bool, ServiceError> {
        let customer = self.billing.restore()?;
        Ok(self.apply(customer))
    }

    fn apply(&mut self, customer: CustomerInfo) -> bool {
        let premium = customer.is_premium();
        self.customer = Some(customer);
        premium
    }
}
