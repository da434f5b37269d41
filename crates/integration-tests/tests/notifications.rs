//! Notice lifecycle around cart mutations.

use std::time::Duration;

use scoop_integration_tests::TestContext;
use scoop_storefront::notify::NoticeKind;

async fn settle() {
    tokio::time::sleep(Duration::from_secs(2)).await;
}

#[tokio::test(start_paused = true)]
async fn removal_posts_a_success_notice_that_expires() {
    let ctx = TestContext::new();
    let vanilla = ctx.product(1);
    ctx.state.cart().set_quantity(&vanilla, 1);
    settle().await;

    ctx.state.cart().remove(vanilla.id);
    settle().await;

    let notice = ctx.state.notifier().current().expect("notice visible");
    assert_eq!(notice.message, "Item removed from cart");
    assert_eq!(notice.kind, NoticeKind::Success);

    // Default TTL is 3 seconds
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(ctx.state.notifier().current().is_none());
}

#[tokio::test(start_paused = true)]
async fn invalid_promo_posts_an_error_notice() {
    let ctx = TestContext::new();
    let result = ctx.state.cart().apply_promo("FREESTUFF").await;
    assert!(result.is_err());

    let notice = ctx.state.notifier().current().expect("notice visible");
    assert_eq!(notice.message, "Invalid promo code");
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[tokio::test(start_paused = true)]
async fn newer_notice_replaces_older_one() {
    let ctx = TestContext::new();
    ctx.state
        .cart()
        .apply_promo("SAVE10")
        .await
        .expect("valid code");
    ctx.state
        .cart()
        .apply_promo("ICECREAM15")
        .await
        .expect("valid code");

    let notice = ctx.state.notifier().current().expect("notice visible");
    assert_eq!(notice.message, "Promo code applied! 15% off");
}
