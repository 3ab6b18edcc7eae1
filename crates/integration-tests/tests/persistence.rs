//! Integration tests for state persisted in the storage file.

#![allow(clippy::unwrap_used)]

use bonprix_core::{Price, ProductId, QuantityChange, Theme};
use bonprix_integration_tests::{RecordingUi, TestContext};
use bonprix_storefront::cart::REMOVE_CONFIRMATION;

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new().await;

    let mut cart = ctx.state().cart();
    cart.add(ProductId::new("7"), "Câble USB-C", Price::from_gnf(15_000));
    cart.add(ProductId::new("7"), "Câble USB-C", Price::from_gnf(15_000));
    cart.add(ProductId::new("9"), "Chargeur", Price::from_gnf(45_000));
    assert_eq!(
        cart.adjust_quantity(&ProductId::new("9"), 1),
        QuantityChange::Updated(2)
    );
    drop(cart);

    let cart = ctx.state().cart();
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total(), Price::from_gnf(120_000));

    let view = cart.view();
    assert_eq!(view.line_count, 2);
    assert_eq!(view.total, "120\u{202f}000\u{a0}GNF");
    assert!(view.checkout_visible);
}

#[tokio::test]
async fn test_confirmed_removal_is_persisted() {
    let ctx = TestContext::new().await;

    let mut cart = ctx.state().cart();
    cart.add(ProductId::new("1"), "Souris", Price::from_gnf(60_000));

    let refuse = RecordingUi::default();
    assert!(!cart.remove_confirmed(&ProductId::new("1"), &refuse));
    assert_eq!(refuse.confirms.borrow().as_slice(), [REMOVE_CONFIRMATION]);
    assert_eq!(ctx.state().cart().item_count(), 1);

    assert!(cart.remove_confirmed(&ProductId::new("1"), &RecordingUi::accepting()));
    let reloaded = ctx.state().cart();
    assert!(reloaded.cart().is_empty());
    assert!(!reloaded.badge().visible);
}

#[tokio::test]
async fn test_theme_survives_restart() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.state().theme().theme(), Theme::LightMode);
    assert_eq!(ctx.state().theme().toggle(), Theme::DarkMode);
    assert_eq!(ctx.state().theme().theme(), Theme::DarkMode);
}

#[tokio::test]
async fn test_corrupt_storage_file_starts_empty() {
    let ctx = TestContext::new().await;
    std::fs::write(ctx.dir.path().join("storage.json"), "{ not json").unwrap();

    let state = ctx.state();
    assert!(state.cart().cart().is_empty());
    assert_eq!(state.theme().theme(), Theme::LightMode);
}
