//! # Pricing Engine
//!
//! Stateless derivation of order totals from a cart snapshot.
//!
//! ## Derivation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartState ──► 1. subtotal        Σ price × quantity                    │
//! │                    │                                                    │
//! │                    ├──► 2. discount    none → 0                         │
//! │                    │                   percentage → subtotal × p / 100  │
//! │                    │                   fixed → min(amount, subtotal)    │
//! │                    │                                                    │
//! │                    ├──► 3. shipping    subtotal ≥ threshold ? 0 : flat  │
//! │                    │        (PRE-discount subtotal, on purpose;         │
//! │                    │         an empty cart ships nothing)               │
//! │                    │                                                    │
//! │                    ├──► 4. tax         max(0, subtotal − discount) × r  │
//! │                    │                                                    │
//! │                    ├──► 5. total       max(0, sub − disc + ship + tax)  │
//! │                    │                                                    │
//! │                    └──► 6. remaining   max(0, threshold − subtotal)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step only reads earlier steps. Nothing here rounds: the summary
//! carries exact decimals and the presentation layer rounds for display.
//!
//! ## Free Shipping Uses the Pre-Discount Subtotal
//! Shipping eligibility rewards purchase volume and is independent of
//! promotional pricing. A $120 cart with FLAT50 still ships free. This is a
//! business-policy decision; switching to the post-discount subtotal needs
//! product sign-off.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartState;
use crate::discount::{DiscountCode, DiscountKind, DiscountTable};
use crate::money::Money;
use crate::validation::{validate_amount, validate_rate, ValidationResult};

// =============================================================================
// Policy Constants
// =============================================================================

/// Sales tax applied to the discounted subtotal: 8.5%.
pub const TAX_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 3);

/// Subtotal at or above which shipping is free: $100.00.
pub const FREE_SHIPPING_THRESHOLD: Money =
    Money::from_decimal(Decimal::from_parts(10000, 0, 0, false, 2));

/// Shipping fee below the threshold: $9.99.
pub const FLAT_SHIPPING: Money = Money::from_decimal(Decimal::from_parts(999, 0, 0, false, 2));

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a fraction of the taxable amount (0.085 = 8.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a fraction.
    #[inline]
    pub const fn from_fraction(rate: Decimal) -> Self {
        TaxRate(rate)
    }

    /// Creates a tax rate from basis points (850 bps = 8.5%).
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    pub fn percentage(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(TAX_RATE)
    }
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Fixed configuration the engine prices against.
///
/// ## Default Values
/// - Tax: 8.5%
/// - Free shipping from: $100.00
/// - Flat shipping: $9.99
/// - Codes: WELCOME10, SAVE20, FLAT50
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Rate applied to the discounted subtotal.
    pub tax_rate: TaxRate,

    /// Pre-discount subtotal that waives shipping.
    pub free_shipping_threshold: Money,

    /// Shipping charged below the threshold.
    pub flat_shipping: Money,

    /// Codes `apply_discount_code` accepts.
    pub discount_codes: DiscountTable,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::default(),
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            flat_shipping: FLAT_SHIPPING,
            discount_codes: DiscountTable::standard(),
        }
    }
}

impl PricingPolicy {
    /// Checks that the policy keeps every summary field non-negative.
    ///
    /// A policy passing this check can never drive the pre-clamp total below
    /// zero: discount ≤ subtotal, and shipping and tax are both ≥ 0. Anything
    /// that would loosen those bounds (negative fees, rates outside 0..=1,
    /// percentage codes above 100) is rejected here.
    ///
    /// Fees are also capped at [`MAX_AMOUNT`](crate::money::MAX_AMOUNT). With
    /// the store keeping every subtotal under the same ceiling, no step of
    /// [`compute_summary`] can overflow.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate("tax rate", self.tax_rate.fraction())?;
        validate_amount("free shipping threshold", self.free_shipping_threshold)?;
        validate_amount("flat shipping", self.flat_shipping)?;
        for code in self.discount_codes.iter() {
            code.validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Totals derived from one cart snapshot.
///
/// Recomputed on every read and never cached across a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Sum of line quantities.
    pub item_count: i64,
    pub free_shipping_threshold: Money,
    /// How much more the shopper must add for free shipping.
    pub free_shipping_remaining: Money,
}

// =============================================================================
// Derivation Steps
// =============================================================================

/// Step 1: Σ price × quantity over all lines.
pub fn subtotal(state: &CartState) -> Money {
    state.lines().iter().map(|line| line.line_total()).sum()
}

/// Step 2: amount taken off by the applied discount.
///
/// ## Example
/// ```rust
/// use shopnow_core::pricing::discount_amount;
/// use shopnow_core::{DiscountCode, Money};
///
/// let flat50 = DiscountCode::fixed("FLAT50", Money::from_cents(5000)).unwrap();
///
/// // Fixed discounts never exceed the subtotal
/// assert_eq!(discount_amount(Money::from_cents(3000), Some(&flat50)), Money::from_cents(3000));
/// assert_eq!(discount_amount(Money::from_cents(3000), None), Money::zero());
/// ```
pub fn discount_amount(subtotal: Money, discount: Option<&DiscountCode>) -> Money {
    match discount {
        None => Money::zero(),
        Some(code) => match code.kind {
            DiscountKind::Percentage => subtotal.percent_of(code.amount),
            DiscountKind::Fixed => Money::from_decimal(code.amount).min(subtotal),
        },
    }
}

/// Step 3: flat fee below the threshold, free at or above it.
///
/// An empty cart has nothing to ship and is charged nothing.
pub fn shipping_cost(subtotal: Money, item_count: i64, policy: &PricingPolicy) -> Money {
    if item_count == 0 || subtotal >= policy.free_shipping_threshold {
        Money::zero()
    } else {
        policy.flat_shipping
    }
}

/// Step 4a: the part of the order tax applies to.
pub fn taxable_amount(subtotal: Money, discount: Money) -> Money {
    (subtotal - discount).clamp_non_negative()
}

/// Step 4b: tax on the taxable amount.
pub fn tax_amount(taxable: Money, rate: TaxRate) -> Money {
    taxable.times_rate(rate.fraction())
}

/// Step 5, before the safety clamp.
///
/// Exposed so tests can assert the clamp in [`order_total`] never fires.
pub fn total_before_clamp(subtotal: Money, discount: Money, shipping: Money, tax: Money) -> Money {
    subtotal - discount + shipping + tax
}

/// Step 5: grand total, floored at zero.
///
/// Under a policy accepted by [`PricingPolicy::validate`] the floor is
/// unreachable; hitting it means the policy or a step above changed shape.
pub fn order_total(subtotal: Money, discount: Money, shipping: Money, tax: Money) -> Money {
    let raw = total_before_clamp(subtotal, discount, shipping, tax);
    if raw.is_negative() {
        tracing::warn!(
            %subtotal, %discount, %shipping, %tax,
            "order total fell below zero before clamping; pricing policy is inconsistent"
        );
    }
    raw.clamp_non_negative()
}

/// Step 6: distance to the free-shipping threshold.
pub fn free_shipping_remaining(subtotal: Money, policy: &PricingPolicy) -> Money {
    (policy.free_shipping_threshold - subtotal).clamp_non_negative()
}

/// Runs every step against a snapshot.
///
/// Pure: the same snapshot and policy always produce the same summary, and
/// the snapshot is only read.
///
/// ## Example
/// ```rust
/// use shopnow_core::{compute_summary, CartState, Money, PricingPolicy};
///
/// let summary = compute_summary(&CartState::empty(), &PricingPolicy::default());
/// assert_eq!(summary.total, Money::zero());
/// assert_eq!(summary.free_shipping_remaining, Money::from_cents(10000));
/// ```
pub fn compute_summary(state: &CartState, policy: &PricingPolicy) -> OrderSummary {
    let subtotal = subtotal(state);
    let discount = discount_amount(subtotal, state.applied_discount());
    let shipping = shipping_cost(subtotal, state.item_count(), policy);
    let tax = tax_amount(taxable_amount(subtotal, discount), policy.tax_rate);
    let total = order_total(subtotal, discount, shipping, tax);

    OrderSummary {
        subtotal,
        discount_amount: discount,
        shipping,
        tax,
        total,
        item_count: state.item_count(),
        free_shipping_threshold: policy.free_shipping_threshold,
        free_shipping_remaining: free_shipping_remaining(subtotal, policy),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
