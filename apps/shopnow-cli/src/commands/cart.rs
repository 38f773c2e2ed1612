//! # Cart Commands
//!
//! Commands for cart manipulation and pricing.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │  Empty   │────►│ In Cart  │────►│  Discounted  │                    │
//! │  │  Cart    │     │          │     │              │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │       ▲                │  add_to_cart       │  remove_discount          │
//! │       │                │  update_cart_item  │  apply_discount_code      │
//! │       │                │  remove_from_cart  │                           │
//! │       │                ▼                    ▼                           │
//! │       └──────────── clear_cart ◄────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries a freshly computed summary; nothing is cached
//! between commands.

use serde::Serialize;
use shopnow_core::{CartLine, CartStore, DiscountCode, DiscountOutcome, OrderSummary};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{AppConfig, CatalogProvider, SessionCart};

/// Summary amounts rounded to cents and formatted with the session's
/// currency symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTotals {
    pub subtotal: String,
    pub discount: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub free_shipping_remaining: String,
}

impl DisplayTotals {
    pub fn new(summary: &OrderSummary, config: &AppConfig) -> Self {
        DisplayTotals {
            subtotal: config.format_currency(summary.subtotal),
            discount: config.format_currency(summary.discount_amount),
            shipping: config.format_currency(summary.shipping),
            tax: config.format_currency(summary.tax),
            total: config.format_currency(summary.total),
            free_shipping_remaining: config.format_currency(summary.free_shipping_remaining),
        }
    }
}

/// Cart response including lines, the applied code and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub applied_discount: Option<DiscountCode>,
    pub summary: OrderSummary,
    pub display: DisplayTotals,
}

impl CartResponse {
    fn new(store: &CartStore, config: &AppConfig) -> Self {
        let state = store.state();
        let summary = store.summary();
        CartResponse {
            lines: state.lines().to_vec(),
            applied_discount: state.applied_discount().cloned(),
            display: DisplayTotals::new(&summary, config),
            summary,
        }
    }
}

/// Exact totals with their display strings alongside.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub display: DisplayTotals,
}

/// Outcome of a discount attempt plus the cart it left behind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    pub outcome: DiscountOutcome,
    pub cart: CartResponse,
}

/// A code the shopper may enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDto {
    pub code: String,
    pub label: String,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &SessionCart, config: &AppConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|store| CartResponse::new(store, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases, the line keeps the price it
///   was first added at
/// - Product not in cart: appended as a new line
/// - Quantities or totals too large to price: rejected, cart unchanged
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Units to add (default: 1)
pub fn add_to_cart(
    cart: &SessionCart,
    config: &AppConfig,
    catalog: &impl CatalogProvider,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity, "add_to_cart command");

    let product = catalog.find(product_id).ok_or_else(|| {
        warn!(product_id = %product_id, "add_to_cart: unknown product");
        ApiError::not_found("Product", product_id)
    })?;

    cart.with_cart_mut(|store| {
        store.add_item(product, quantity)?;
        Ok(CartResponse::new(store, config))
    })
}

/// Sets a line's quantity; zero or less removes the line.
///
/// Unknown ids leave the cart unchanged.
pub fn update_cart_item(
    cart: &SessionCart,
    config: &AppConfig,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity, "update_cart_item command");
    cart.with_cart_mut(|store| {
        store.set_quantity(product_id, quantity)?;
        Ok(CartResponse::new(store, config))
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &SessionCart, config: &AppConfig, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.with_cart_mut(|store| {
        store.remove_item(product_id);
        CartResponse::new(store, config)
    })
}

/// Empties the cart and drops any applied code.
pub fn clear_cart(cart: &SessionCart, config: &AppConfig) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|store| {
        store.clear();
        CartResponse::new(store, config)
    })
}

/// Tries a discount code. Unknown codes are reported in the outcome, not as
/// an error.
pub fn apply_discount_code(cart: &SessionCart, config: &AppConfig, code: &str) -> DiscountResponse {
    debug!(code = %code, "apply_discount_code command");
    cart.with_cart_mut(|store| {
        let outcome = store.apply_discount_code(code);
        DiscountResponse {
            outcome,
            cart: CartResponse::new(store, config),
        }
    })
}

/// Drops the applied code, if any.
pub fn remove_discount(cart: &SessionCart, config: &AppConfig) -> CartResponse {
    debug!("remove_discount command");
    cart.with_cart_mut(|store| {
        store.remove_discount();
        CartResponse::new(store, config)
    })
}

/// Totals for the current cart.
pub fn get_summary(cart: &SessionCart, config: &AppConfig) -> SummaryResponse {
    debug!("get_summary command");
    let summary = cart.with_cart(|store| store.summary());
    SummaryResponse {
        display: DisplayTotals::new(&summary, config),
        summary,
    }
}

/// Codes the current policy accepts.
pub fn list_codes(cart: &SessionCart) -> Vec<CodeDto> {
    debug!("list_codes command");
    cart.with_cart(|store| {
        store
            .policy()
            .discount_codes
            .iter()
            .map(|code| CodeDto {
                code: code.code.clone(),
                label: code.label(),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::DemoCatalog;
    use shopnow_core::{Money, Product};

    fn setup() -> (SessionCart, AppConfig, DemoCatalog) {
        (
            SessionCart::new(CartStore::default()),
            AppConfig::default(),
            DemoCatalog::new().unwrap(),
        )
    }

    #[test]
    fn test_add_and_merge() {
        let (cart, config, catalog) = setup();
        add_to_cart(&cart, &config, &catalog, "3", None).unwrap();
        let response = add_to_cart(&cart, &config, &catalog, "3", Some(2)).unwrap();

        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].quantity(), 3);
        assert_eq!(response.summary.item_count, 3);
        assert_eq!(response.summary.subtotal, Money::from_cents(14997));
        assert_eq!(response.display.subtotal, "$149.97");
    }

    #[test]
    fn test_add_unknown_product() {
        let (cart, config, catalog) = setup();
        let err = add_to_cart(&cart, &config, &catalog, "404", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&cart, &config).lines.is_empty());
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let (cart, config, catalog) = setup();
        let err = add_to_cart(&cart, &config, &catalog, "1", Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(get_cart(&cart, &config).lines.is_empty());
    }

    #[test]
    fn test_add_rejects_cart_wide_item_count_overflow() {
        let (cart, config, _) = setup();
        let catalog = DemoCatalog::from_products(vec![
            Product::new(1, "Sticker", Money::zero()).unwrap(),
            Product::new(2, "Pin", Money::zero()).unwrap(),
        ]);
        add_to_cart(&cart, &config, &catalog, "1", Some(i64::MAX)).unwrap();
        let err = add_to_cart(&cart, &config, &catalog, "2", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let response = get_cart(&cart, &config);
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.summary.item_count, i64::MAX);
    }

    #[test]
    fn test_update_rejects_unpriceable_subtotal() {
        let (cart, config, _) = setup();
        let price: Money = "10000000000000000".parse().unwrap();
        let catalog = DemoCatalog::from_products(vec![Product::new(1, "Yacht", price).unwrap()]);
        add_to_cart(&cart, &config, &catalog, "1", None).unwrap();

        let err = update_cart_item(&cart, &config, "1", 100_000_000_000).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&cart, &config).summary.subtotal, price);
    }

    #[test]
    fn test_update_and_remove() {
        let (cart, config, catalog) = setup();
        add_to_cart(&cart, &config, &catalog, "1", None).unwrap();
        add_to_cart(&cart, &config, &catalog, "2", None).unwrap();

        let response = update_cart_item(&cart, &config, "1", 4).unwrap();
        assert_eq!(response.summary.item_count, 5);

        let response = update_cart_item(&cart, &config, "1", 0).unwrap();
        assert_eq!(response.lines.len(), 1);

        let response = remove_from_cart(&cart, &config, "2");
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_discount_flow() {
        let (cart, config, catalog) = setup();
        add_to_cart(&cart, &config, &catalog, "1", None).unwrap();

        let response = apply_discount_code(&cart, &config, "bogus");
        assert!(!response.outcome.success);
        assert!(response.cart.applied_discount.is_none());

        let response = apply_discount_code(&cart, &config, "save20");
        assert!(response.outcome.success);
        assert_eq!(
            response.outcome.message,
            "Discount code \"save20\" applied successfully!"
        );
        assert_eq!(response.cart.applied_discount.unwrap().code, "SAVE20");

        let response = remove_discount(&cart, &config);
        assert!(response.applied_discount.is_none());
        assert!(response.summary.discount_amount.is_zero());
    }

    #[test]
    fn test_clear_resets_summary() {
        let (cart, config, catalog) = setup();
        add_to_cart(&cart, &config, &catalog, "2", Some(2)).unwrap();
        apply_discount_code(&cart, &config, "FLAT50");

        let response = clear_cart(&cart, &config);
        assert!(response.lines.is_empty());
        assert!(response.applied_discount.is_none());
        assert!(response.summary.total.is_zero());
        assert_eq!(get_summary(&cart, &config).summary, response.summary);
    }

    #[test]
    fn test_display_uses_configured_currency() {
        let (cart, _, catalog) = setup();
        let config = AppConfig {
            currency_symbol: "€".to_string(),
            ..AppConfig::default()
        };
        add_to_cart(&cart, &config, &catalog, "1", None).unwrap();
        add_to_cart(&cart, &config, &catalog, "3", Some(2)).unwrap();
        apply_discount_code(&cart, &config, "SAVE20");

        let display = get_summary(&cart, &config).display;
        assert_eq!(display.subtotal, "€199.97");
        assert_eq!(display.discount, "€39.99");
        assert_eq!(display.shipping, "€0.00");
        assert_eq!(display.tax, "€13.60");
        assert_eq!(display.total, "€173.57");
        assert_eq!(display.free_shipping_remaining, "€0.00");
    }

    #[test]
    fn test_list_codes() {
        let (cart, _, _) = setup();
        let codes = list_codes(&cart);
        let names: Vec<_> = codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(names, ["WELCOME10", "SAVE20", "FLAT50"]);
        assert_eq!(codes[2].label, "$50.00 off");
    }

    #[test]
    fn test_response_json_shape() {
        let (cart, config, catalog) = setup();
        add_to_cart(&cart, &config, &catalog, "3", None).unwrap();
        let json = serde_json::to_value(get_cart(&cart, &config)).unwrap();

        assert_eq!(json["lines"][0]["product"]["id"], "3");
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert!(json["appliedDiscount"].is_null());
        assert_eq!(json["summary"]["subtotal"], "49.99");
        assert_eq!(json["summary"]["shipping"], "9.99");
        assert_eq!(json["display"]["total"], "$64.23");

        let json = serde_json::to_value(get_summary(&cart, &config)).unwrap();
        assert_eq!(json["subtotal"], "49.99");
        assert_eq!(json["freeShippingRemaining"], "50.01");
        assert_eq!(json["display"]["freeShippingRemaining"], "$50.01");
    }
}
