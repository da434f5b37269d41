//! Pricing engine.
//!
//! Pure totals computation over cart lines. Snapshots are derived on every
//! read and never stored; arithmetic stays in exact decimals and is rounded
//! only by the display helpers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// Pricing policy knobs, loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Sales tax rate applied to the discounted subtotal.
    pub tax_rate: Decimal,
    /// Flat shipping fee charged below the free-shipping threshold.
    pub shipping_fee: Decimal,
    /// Discounted subtotal that must be strictly exceeded for free
    /// shipping; a subtotal of exactly this value still pays the fee.
    pub free_shipping_threshold: Decimal,
    /// Whether a zero-item cart still incurs the shipping fee. The shop's
    /// historical arithmetic charged it; flip this to short-circuit empty
    /// carts to a zero total.
    pub ship_empty_carts: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            shipping_fee: Decimal::new(599, 2),
            free_shipping_threshold: Decimal::new(50, 0),
            ship_empty_carts: true,
        }
    }
}

/// Derived view of cart totals. Recomputed from cart contents on every
/// query, never cached or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Sum of unit price x quantity over all lines.
    pub subtotal: Decimal,
    /// Amount removed by the active promo.
    pub discount: Decimal,
    /// Tax on the discounted subtotal.
    pub tax: Decimal,
    /// Shipping fee, zero when the free-shipping threshold is exceeded.
    pub shipping: Decimal,
    /// Grand total.
    pub total: Decimal,
    /// Sum of quantities across all lines.
    pub item_count: u32,
}

impl PricingSnapshot {
    /// Shipping formatted for display: `Free` when zero, `$x.xx` otherwise.
    #[must_use]
    pub fn shipping_display(&self) -> String {
        if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            format_amount(self.shipping)
        }
    }

    /// Grand total formatted for display.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_amount(self.total)
    }

    /// Subtotal formatted for display.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_amount(self.subtotal)
    }
}

/// Format a decimal dollar amount for display, rounding to two places.
///
/// This is the only point where pricing values are rounded.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Compute totals for the given lines and active discount percent.
///
/// The arithmetic, in order: subtotal, promo discount, tax on the
/// discounted subtotal, shipping (free only when the discounted subtotal
/// strictly exceeds the threshold), grand total.
#[must_use]
pub fn compute_totals(
    lines: &[CartLine],
    discount_percent: u8,
    policy: &PricingPolicy,
) -> PricingSnapshot {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
    let discount = subtotal * Decimal::from(discount_percent) / Decimal::ONE_HUNDRED;
    let discounted_subtotal = subtotal - discount;
    let tax = discounted_subtotal * policy.tax_rate;
    let free_shipping = discounted_subtotal > policy.free_shipping_threshold
        || (lines.is_empty() && !policy.ship_empty_carts);
    let shipping = if free_shipping {
        Decimal::ZERO
    } else {
        policy.shipping_fee
    };
    let total = discounted_subtotal + tax + shipping;
    let item_count = lines.iter().map(|line| line.quantity).sum();

    PricingSnapshot {
        subtotal,
        discount,
        tax,
        shipping,
        total,
        item_count,
    }
}
