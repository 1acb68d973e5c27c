//! Integration tests for notifications raised by storefront actions.
//!
//! Run with: cargo test -p dariy-integration-tests --test toast_flows

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dariy_integration_tests::storefront;
use dariy_storefront::actions::{
    AddToCart, TOAST_ADDED_TO_CART, TOAST_ADDED_TO_FAVORITES, TOAST_CART_CLEARED,
};
use dariy_storefront::store::ToastPhase;
use tempfile::TempDir;

#[test]
fn test_latest_action_wins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut shop = storefront(dir.path());

    shop.add_to_cart(
        "hoodie-01",
        AddToCart {
            qty: 1,
            ..AddToCart::default()
        },
    )
    .expect("add");
    shop.toggle_favorite("hoodie-01");

    assert_eq!(shop.toast().message(), Some(TOAST_ADDED_TO_FAVORITES));
}

#[test]
fn test_display_dismisses_after_configured_timings() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut shop = storefront(dir.path());
    let mut display = shop.toast_display();

    shop.clear_cart();
    let schedule = display.sync(shop.toast()).expect("new toast scheduled");
    assert_eq!(schedule.hide_after, Duration::from_millis(2500));
    assert_eq!(schedule.clear_after, Duration::from_millis(2800));
    assert_eq!(display.rendered(), Some(TOAST_CART_CLEARED));

    assert!(display.on_hide_elapsed(schedule.token));
    assert!(display.is_exiting());
    assert!(display.on_clear_elapsed(schedule.token, shop.toast_mut()));
    assert_eq!(display.phase(), &ToastPhase::Hidden);
    assert_eq!(shop.toast().message(), None);
}

#[test]
fn test_replaced_toast_ignores_old_timers() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut shop = storefront(dir.path());
    let mut display = shop.toast_display();

    shop.clear_cart();
    let first = display.sync(shop.toast()).expect("first toast");
    shop.add_to_cart(
        "hoodie-01",
        AddToCart {
            qty: 1,
            ..AddToCart::default()
        },
    )
    .expect("add");
    let second = display.sync(shop.toast()).expect("second toast");

    assert!(!display.on_hide_elapsed(first.token));
    assert!(!display.on_clear_elapsed(first.token, shop.toast_mut()));
    assert_eq!(shop.toast().message(), Some(TOAST_ADDED_TO_CART));
    assert_eq!(display.rendered(), Some(TOAST_ADDED_TO_CART));

    assert!(display.on_hide_elapsed(second.token));
    assert!(display.on_clear_elapsed(second.token, shop.toast_mut()));
    assert_eq!(shop.toast().message(), None);
}

#[test]
fn test_toast_listener() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut shop = storefront(dir.path());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _subscription = {
        let seen = Rc::clone(&seen);
        shop.toast().subscribe(move |message| seen.borrow_mut().push(message.clone()))
    };

    shop.clear_cart();
    shop.toast_mut().clear();

    assert_eq!(*seen.borrow(), [Some(TOAST_CART_CLEARED.to_string()), None]);
}
