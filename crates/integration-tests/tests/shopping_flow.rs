//! End-to-end shopping journeys against an in-memory storefront.

use std::time::Duration;

use rust_decimal::Decimal;
use scoop_core::ProductId;
use scoop_integration_tests::TestContext;
use scoop_storefront::catalog::Category;
use scoop_storefront::orders::ShippingAddress;

fn address() -> ShippingAddress {
    ShippingAddress {
        street: "123 Main St".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip: "10001".to_string(),
        country: "United States".to_string(),
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_secs(2)).await;
}

#[tokio::test(start_paused = true)]
async fn browse_then_fill_cart() {
    let ctx = TestContext::new();

    // Browse: the popular shelf and category filters work off the seed
    assert_eq!(ctx.state.catalog().len(), 5);
    assert!(!ctx.state.catalog().popular().is_empty());
    assert_eq!(ctx.state.catalog().by_category(Category::Premium).len(), 1);

    // Fill the cart from two products
    ctx.state.cart().set_quantity(&ctx.product(1), 2);
    ctx.state.cart().set_quantity(&ctx.product(2), 1);
    settle().await;

    assert_eq!(ctx.state.cart().count(), 2);
    let totals = ctx.state.cart().snapshot();
    // 2 x $12.99 + $14.99 = $40.97, below free shipping
    assert_eq!(totals.subtotal, Decimal::new(4097, 2));
    assert_eq!(totals.shipping, Decimal::new(599, 2));
    assert_eq!(totals.item_count, 3);
}

#[tokio::test(start_paused = true)]
async fn quantity_edits_replace_not_add() {
    let ctx = TestContext::new();
    let vanilla = ctx.product(1);

    ctx.state.cart().set_quantity(&vanilla, 2);
    settle().await;
    ctx.state.cart().set_quantity(&vanilla, 6);
    settle().await;

    let line = ctx.state.cart().line(vanilla.id).expect("one line");
    assert_eq!(line.quantity, 6);
    assert_eq!(ctx.state.cart().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn promo_then_checkout_records_order() {
    let ctx = TestContext::new();
    let user = ctx.sign_in();
    assert_eq!(ctx.state.greeting(), "Welcome back, Alice!");

    // 4 x $16.99 = $67.96
    ctx.state.cart().set_quantity(&ctx.product(5), 4);
    settle().await;
    ctx.state
        .cart()
        .apply_promo("welcome20")
        .await
        .expect("valid code");

    let order = ctx
        .state
        .cart()
        .checkout(Some(user), address())
        .await
        .expect("checkout");

    // Frozen at checkout: $67.96 - 20% = $54.368 -> free shipping
    assert_eq!(order.totals.discount, Decimal::new(135_92, 3));
    assert_eq!(order.totals.shipping, Decimal::ZERO);
    assert_eq!(order.user, Some(user));

    // Cart is emptied, discount reset, order visible in history
    assert!(ctx.state.cart().lines().is_empty());
    assert_eq!(ctx.state.cart().discount_percent(), 0);
    let history = ctx.state.orders().list_for(user).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history.first().map(|o| o.id), Some(order.id));
}

#[tokio::test(start_paused = true)]
async fn removing_unknown_product_is_silent() {
    let ctx = TestContext::new();
    ctx.state.cart().remove(ProductId::new(42));
    settle().await;
    assert!(ctx.state.cart().lines().is_empty());
}
