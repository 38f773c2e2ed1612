//! # shopnow-core: Cart State and Order Totals
//!
//! This crate is the **heart** of the ShopNow storefront. Everything that has
//! an invariant or produces a number lives here; rendering, navigation and the
//! product catalog stay outside.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopNow Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (storefront UI)                    │   │
//! │  │    Product List ──► Product Detail ──► Cart Screen              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / snapshots                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopnow-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │  pricing  │  │ discount  │  │   │
//! │  │   │  Product  │  │ CartStore │  │  Summary  │  │   codes   │  │   │
//! │  │   │  Money    │  │ CartState │  │  Policy   │  │   table   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE DERIVATIONS                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and cart line records
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`discount`] - Discount codes and the known-code table
//! - [`cart`] - The Cart Store: snapshots, mutations, change notification
//! - [`pricing`] - The Pricing Engine: policy and order summary
//! - [`error`] - Domain error types
//! - [`validation`] - Contract checks shared by the store and the policy
//!
//! ## Example Usage
//!
//! ```rust
//! use shopnow_core::{CartStore, Money, PricingPolicy, Product};
//!
//! let mut store = CartStore::new(PricingPolicy::default()).unwrap();
//! let headphones = Product::new("1", "Wireless Headphones", Money::from_cents(9999)).unwrap();
//!
//! store.add_item(&headphones, 1).unwrap();
//! let outcome = store.apply_discount_code("welcome10");
//! assert!(outcome.success);
//!
//! let summary = store.summary();
//! assert_eq!(summary.subtotal, Money::from_cents(9999));
//! assert_eq!(summary.shipping, Money::from_cents(999)); // under $100
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, CartStore};
pub use discount::{DiscountCode, DiscountKind, DiscountOutcome, DiscountTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_summary, OrderSummary, PricingPolicy, TaxRate};
pub use types::{CartLine, Product, ProductId};
