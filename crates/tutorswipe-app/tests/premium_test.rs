use tutorswipe_app::fixtures;
use tutorswipe_app::{CustomerInfo, PremiumScreen, ServiceError, PREMIUM_ENTITLEMENT};
use tutorswipe_testing::{MockBillingProvider, PurchaseBehavior};

fn screen(behavior: PurchaseBehavior) -> PremiumScreen<MockBillingProvider> {
    let billing =
        MockBillingProvider::new(Some(fixtures::premium_offering())).with_behavior(behavior);
    let mut screen = PremiumScreen::new(billing);
    screen.load().unwrap();
    screen
}

#[test]
fn load_lists_packages() {
    let loaded = screen(PurchaseBehavior::GrantPremium);
    let ids: Vec<&str> = loaded
        .packages()
        .iter()
        .map(|package| package.identifier.as_str())
        .collect();
    assert_eq!(ids, ["$rc_monthly", "$rc_annual"]);
    assert!(!loaded.is_premium());
}

#[test]
fn purchase_unlocks_premium() {
    let mut premium = screen(PurchaseBehavior::GrantPremium);
    assert_eq!(premium.purchase("$rc_annual"), Ok(true));
    assert!(premium.is_premium());
    assert_eq!(premium.billing().purchases(), ["$rc_annual"]);
}

#[test]
fn cancelled_purchase_is_not_an_error() {
    let mut cancelled = screen(PurchaseBehavior::Cancel);
    assert_eq!(cancelled.purchase("$rc_monthly"), Ok(false));
    assert!(!cancelled.is_premium());
}

#[test]
fn declined_purchase_is_an_error() {
    let mut declined = screen(PurchaseBehavior::Decline);
    assert!(matches!(
        declined.purchase("$rc_monthly"),
        Err(ServiceError::Rejected { .. })
    ));

    let mut unentitled = screen(PurchaseBehavior::NoEntitlement);
    assert_eq!(unentitled.purchase("$rc_monthly"), Ok(false));
}

#[test]
fn unknown_package_never_reaches_the_store() {
    let mut offered = screen(PurchaseBehavior::GrantPremium);
    assert_eq!(
        offered.purchase("$rc_lifetime"),
        Err(ServiceError::UnknownPackage {
            identifier: "$rc_lifetime".to_string()
        })
    );
    assert!(offered.billing().purchases().is_empty());

    let mut empty = PremiumScreen::new(MockBillingProvider::new(None));
    empty.load().unwrap();
    assert!(empty.packages().is_empty());
    assert!(empty.purchase("$rc_monthly").is_err());
}

#[test]
fn restore() {
    let mut nothing = screen(PurchaseBehavior::GrantPremium);
    assert_eq!(nothing.restore(), Ok(false));

    let billing =
        MockBillingProvider::new(Some(fixtures::premium_offering())).with_restorable_premium();
    let mut restored = PremiumScreen::new(billing);
    assert_eq!(restored.restore(), Ok(true));
    assert!(restored.is_premium());
}

#[test]
fn existing_entitlement_is_premium_on_load() {
    let billing = MockBillingProvider::new(None)
        .with_customer(CustomerInfo::default().with_entitlement(PREMIUM_ENTITLEMENT));
    let mut returning = PremiumScreen::new(billing);
    assert!(!returning.is_premium());
    returning.load().unwrap();
    assert!(returning.is_premium());
}
