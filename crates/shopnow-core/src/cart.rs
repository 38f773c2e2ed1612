//! # Cart Store
//!
//! The single authority over what the shopper has picked.
//!
//! ## Snapshots, Not Edits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                 CartStore                 Observers             │
//! │  ──────                 ─────────                 ─────────             │
//! │                                                                         │
//! │  add_item(p, 2) ──────► validate ──► build next ──► Arc<CartState> v2  │
//! │                                           │                             │
//! │                                           ├──► returned to caller      │
//! │                                           └──► watch::Sender → UI      │
//! │                                                                         │
//! │  Readers holding v1 keep seeing v1. Nothing is edited in place, so a   │
//! │  snapshot can never be observed half-way through a mutation.           │
//! │                                                                         │
//! │  No-op mutations (removing an absent id, re-applying the same code)    │
//! │  keep the current Arc and notify nobody.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! `CartStore` needs `&mut self` to mutate, so one writer at a time is
//! enforced by the borrow checker. A host with several concurrent callers
//! wraps the store in a `Mutex` at its own boundary; snapshots are `Send +
//! Sync` and may be priced from any thread.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::discount::{DiscountCode, DiscountOutcome};
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, MAX_AMOUNT};
use crate::pricing::{compute_summary, OrderSummary, PricingPolicy};
use crate::types::{CartLine, Product};
use crate::validation::ValidationResult;

// =============================================================================
// Cart State
// =============================================================================

/// An immutable snapshot of the cart.
///
/// ## Invariants
/// - Every line has `quantity >= 1`
/// - At most one line per product id
/// - Lines are in first-added order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    lines: Vec<CartLine>,
    applied_discount: Option<DiscountCode>,
}

impl CartState {
    /// The state every session starts from.
    pub fn empty() -> Self {
        CartState::default()
    }

    /// Line items in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The discount currently applied, if any.
    #[inline]
    pub fn applied_discount(&self) -> Option<&DiscountCode> {
        self.applied_discount.as_ref()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Whether the product has a line.
    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.line(product_id).is_some()
    }

    /// Units of the product in the cart, zero when absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.line(product_id).map_or(0, CartLine::quantity)
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Confirms the snapshot can be priced without overflow.
    ///
    /// ## Rules
    /// - The sum of quantities fits in an `i64`
    /// - The subtotal stays at or below [`MAX_AMOUNT`]
    ///
    /// The store runs this on every state it is about to commit, so the
    /// unchecked arithmetic in [`CartState::item_count`] and the pricing
    /// steps never sees a value it cannot hold.
    fn check_totals(&self) -> CoreResult<()> {
        let mut count: i64 = 0;
        let mut subtotal = Money::zero();
        for line in &self.lines {
            count = count
                .checked_add(line.quantity())
                .ok_or(CoreError::ItemCountOverflow)?;
            subtotal = line
                .product()
                .price
                .checked_multiply_quantity(line.quantity())
                .and_then(|line_total| subtotal.checked_add(line_total))
                .filter(|total| *total <= MAX_AMOUNT)
                .ok_or(CoreError::SubtotalTooLarge { max: MAX_AMOUNT })?;
        }
        Ok(())
    }

    fn without_line(&self, product_id: &str) -> CartState {
        CartState {
            lines: self
                .lines
                .iter()
                .filter(|l| l.product_id() != product_id)
                .cloned()
                .collect(),
            applied_discount: self.applied_discount.clone(),
        }
    }

    fn with_line_quantity(&self, product_id: &str, quantity: i64) -> CartState {
        CartState {
            lines: self
                .lines
                .iter()
                .map(|l| {
                    if l.product_id() == product_id {
                        l.with_quantity(quantity)
                    } else {
                        l.clone()
                    }
                })
                .collect(),
            applied_discount: self.applied_discount.clone(),
        }
    }

    fn with_discount(&self, discount: Option<DiscountCode>) -> CartState {
        CartState {
            lines: self.lines.clone(),
            applied_discount: discount,
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the current [`CartState`] and the policy it is priced against.
///
/// Construct one per shopping session and hand it to whatever owns the
/// session; there is no process-wide cart.
#[derive(Debug)]
pub struct CartStore {
    state: Arc<CartState>,
    policy: Arc<PricingPolicy>,
    notifier: watch::Sender<Arc<CartState>>,
}

impl Default for CartStore {
    /// An empty store priced with the standard policy.
    fn default() -> Self {
        CartStore::with_valid_policy(Arc::new(PricingPolicy::default()))
    }
}

impl CartStore {
    /// Creates an empty store, rejecting an inconsistent policy.
    pub fn new(policy: PricingPolicy) -> ValidationResult<Self> {
        CartStore::with_shared_policy(Arc::new(policy))
    }

    /// Like [`CartStore::new`] for a policy shared between sessions.
    pub fn with_shared_policy(policy: Arc<PricingPolicy>) -> ValidationResult<Self> {
        policy.validate()?;
        Ok(CartStore::with_valid_policy(policy))
    }

    fn with_valid_policy(policy: Arc<PricingPolicy>) -> Self {
        let state = Arc::new(CartState::empty());
        let (notifier, _) = watch::channel(Arc::clone(&state));
        CartStore {
            state,
            policy,
            notifier,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The current snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.state)
    }

    /// Borrow of the current snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The policy this store prices against.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Receives every new snapshot after each effective mutation.
    ///
    /// ## Usage
    /// ```rust
    /// use shopnow_core::{CartStore, Money, Product};
    ///
    /// let mut store = CartStore::default();
    /// let mut updates = store.subscribe();
    ///
    /// let wallet = Product::new("3", "Leather Wallet", Money::from_cents(4999)).unwrap();
    /// store.add_item(&wallet, 1).unwrap();
    ///
    /// assert!(updates.has_changed().unwrap());
    /// assert_eq!(updates.borrow_and_update().item_count(), 1);
    /// ```
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartState>> {
        self.notifier.subscribe()
    }

    /// Prices the current snapshot.
    pub fn summary(&self) -> OrderSummary {
        compute_summary(&self.state, &self.policy)
    }

    /// Whether the product has a line.
    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.state.is_in_cart(product_id)
    }

    /// Units of the product in the cart, zero when absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.state.quantity_of(product_id)
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// Identifiers of the codes this store accepts.
    pub fn available_codes(&self) -> Vec<String> {
        self.policy.discount_codes.identifiers()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increases, position unchanged
    /// - Product not in cart: a new line is appended
    ///
    /// ## Errors
    /// - [`CoreError::NonPositiveQuantity`] when `quantity < 1`
    /// - [`CoreError::Validation`] when the product record is malformed
    /// - [`CoreError::QuantityOverflow`] when the line quantity would overflow
    /// - [`CoreError::ItemCountOverflow`] / [`CoreError::SubtotalTooLarge`]
    ///   when the cart as a whole could no longer be priced
    ///
    /// On error the cart is unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<Arc<CartState>> {
        if quantity < 1 {
            warn!(product_id = %product.id, quantity, "rejected add_item with non-positive quantity");
            return Err(CoreError::NonPositiveQuantity {
                requested: quantity,
            });
        }
        product.validate()?;

        let id = product.id.as_str();
        let next = match self.state.line(id) {
            Some(line) => {
                let total = line.quantity().checked_add(quantity).ok_or_else(|| {
                    CoreError::QuantityOverflow {
                        product_id: id.to_string(),
                    }
                })?;
                self.state.with_line_quantity(id, total)
            }
            None => {
                let mut lines = self.state.lines.clone();
                lines.push(CartLine::new(product.clone(), quantity));
                CartState {
                    lines,
                    applied_discount: self.state.applied_discount.clone(),
                }
            }
        };
        next.check_totals().inspect_err(|e| {
            warn!(product_id = %id, quantity, error = %e, "rejected add_item");
        })?;

        debug!(product_id = %id, quantity, "item added to cart");
        Ok(self.commit(next))
    }

    /// Removes a product's line. Absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> Arc<CartState> {
        if !self.state.is_in_cart(product_id) {
            return self.snapshot();
        }
        debug!(product_id, "item removed from cart");
        let next = self.state.without_line(product_id);
        self.commit(next)
    }

    /// Replaces a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`CartStore::remove_item`]
    /// - Product not in cart, or quantity unchanged: no-op
    ///
    /// ## Errors
    /// [`CoreError::ItemCountOverflow`] / [`CoreError::SubtotalTooLarge`] when
    /// the new quantity would make the cart unpriceable. The cart is unchanged.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<Arc<CartState>> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }
        match self.state.line(product_id) {
            None => {
                debug!(product_id, quantity, "set_quantity ignored for product not in cart");
                return Ok(self.snapshot());
            }
            Some(line) if line.quantity() == quantity => return Ok(self.snapshot()),
            Some(_) => {}
        }

        let next = self.state.with_line_quantity(product_id, quantity);
        next.check_totals().inspect_err(|e| {
            warn!(product_id, quantity, error = %e, "rejected set_quantity");
        })?;

        debug!(product_id, quantity, "cart quantity set");
        Ok(self.commit(next))
    }

    /// Empties the cart and drops the applied discount.
    pub fn clear(&mut self) -> Arc<CartState> {
        if self.state.is_empty() && self.state.applied_discount.is_none() {
            return self.snapshot();
        }
        debug!("cart cleared");
        self.commit(CartState::empty())
    }

    /// Applies a shopper-entered code, matched case-insensitively.
    ///
    /// ## Returns
    /// - Known code: `success: true`, discount replaces any previous one
    /// - Unknown code: `success: false`, cart unchanged
    pub fn apply_discount_code(&mut self, code: &str) -> DiscountOutcome {
        let Some(discount) = self.policy.discount_codes.lookup(code) else {
            warn!(code, "unknown discount code");
            return DiscountOutcome::rejected();
        };

        if self.state.applied_discount.as_ref() != Some(discount) {
            debug!(code = %discount.code, "discount applied");
            let next = self.state.with_discount(Some(discount.clone()));
            self.commit(next);
        }
        DiscountOutcome::applied(code)
    }

    /// Drops the applied discount, if any.
    pub fn remove_discount(&mut self) -> Arc<CartState> {
        if self.state.applied_discount.is_none() {
            return self.snapshot();
        }
        debug!("discount removed");
        let next = self.state.with_discount(None);
        self.commit(next)
    }

    /// Swaps in the next snapshot and notifies subscribers.
    ///
    /// Callers only get here with a state that differs from the current one.
    fn commit(&mut self, next: CartState) -> Arc<CartState> {
        self.state = Arc::new(next);
        self.notifier.send_replace(Arc::clone(&self.state));
        self.snapshot()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
