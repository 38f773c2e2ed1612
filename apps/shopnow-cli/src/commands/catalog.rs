//! # Catalog Commands
//!
//! Product listing for the storefront grid.

use serde::Serialize;
use shopnow_core::{Money, Product};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogProvider, SessionCart};

/// Product DTO for display.
///
/// Adds the derived markdown fields product cards show and whether the
/// product is already in the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub savings: Option<Money>,
    pub discount_percentage: Option<u32>,
    pub in_cart: bool,
    pub quantity_in_cart: i64,
}

impl ProductDto {
    fn new(product: &Product, cart: &SessionCart) -> Self {
        let quantity_in_cart = cart.with_cart(|store| store.quantity_of(product.id.as_str()));
        ProductDto {
            product: product.clone(),
            savings: product.savings(),
            discount_percentage: product.discount_percentage(),
            in_cart: quantity_in_cart > 0,
            quantity_in_cart,
        }
    }
}

/// Lists every catalog product.
pub fn list_products(catalog: &impl CatalogProvider, cart: &SessionCart) -> Vec<ProductDto> {
    debug!("list_products command");
    catalog
        .products()
        .iter()
        .map(|product| ProductDto::new(product, cart))
        .collect()
}

/// Gets a single product by id.
pub fn get_product(
    catalog: &impl CatalogProvider,
    cart: &SessionCart,
    product_id: &str,
) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    catalog
        .find(product_id)
        .map(|product| ProductDto::new(product, cart))
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DemoCatalog;
    use shopnow_core::CartStore;

    #[test]
    fn test_list_marks_cart_membership() {
        let catalog = DemoCatalog::new().unwrap();
        let cart = SessionCart::new(CartStore::default());
        let wallet = catalog.find("3").unwrap().clone();
        cart.with_cart_mut(|s| s.add_item(&wallet, 2)).unwrap();

        let products = list_products(&catalog, &cart);
        assert_eq!(products.len(), 8);

        let listed = products.iter().find(|p| p.product.id == "3").unwrap();
        assert!(listed.in_cart);
        assert_eq!(listed.quantity_in_cart, 2);
        assert_eq!(listed.savings, Some(Money::from_cents(2000)));
        assert!(!products[0].in_cart);
    }

    #[test]
    fn test_get_product_json_is_flat() {
        let catalog = DemoCatalog::new().unwrap();
        let cart = SessionCart::new(CartStore::default());

        let json = serde_json::to_value(get_product(&catalog, &cart, "1").unwrap()).unwrap();
        assert_eq!(json["name"], "Wireless Headphones");
        assert_eq!(json["originalPrice"], "129.99");
        assert_eq!(json["discountPercentage"], 23);

        assert!(get_product(&catalog, &cart, "0").is_err());
    }
}
