//! # Catalog
//!
//! Where product data comes from. The cart never owns the catalog; commands
//! resolve an id here and hand the resulting [`Product`] snapshot to the
//! store.

use shopnow_core::{Money, Product, ValidationError};

/// Read-only product lookup.
pub trait CatalogProvider {
    /// Finds a product by id.
    fn find(&self, id: &str) -> Option<&Product>;

    /// All products, in display order.
    fn products(&self) -> &[Product];
}

/// Fixed in-memory catalog used for demos and tests.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    products: Vec<Product>,
}

impl DemoCatalog {
    /// The storefront's sample products.
    pub fn new() -> Result<Self, ValidationError> {
        let seed: [(u64, &str, i64, i64); 8] = [
            (1, "Wireless Headphones", 9999, 12999),
            (2, "Smartwatch Series 5", 29999, 34999),
            (3, "Leather Wallet", 4999, 6999),
            (4, "Sneakers AirX", 12999, 15999),
            (5, "Backpack Classic", 7999, 9999),
            (6, "Sunglasses Vintage", 8999, 11999),
            (7, "Bluetooth Speaker Mini", 5999, 7999),
            (8, "Fitness Tracker Pro", 19999, 24999),
        ];

        let products = seed
            .into_iter()
            .map(|(id, name, price, original)| {
                Product::new(id, name, Money::from_cents(price))?
                    .with_original_price(Money::from_cents(original))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DemoCatalog { products })
    }

    /// A catalog holding exactly `products`.
    pub fn from_products(products: Vec<Product>) -> Self {
        DemoCatalog { products }
    }
}

impl CatalogProvider for DemoCatalog {
    fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_contents() {
        let catalog = DemoCatalog::new().unwrap();
        assert_eq!(catalog.products().len(), 8);

        let wallet = catalog.find("3").unwrap();
        assert_eq!(wallet.name, "Leather Wallet");
        assert_eq!(wallet.price, Money::from_cents(4999));
        assert_eq!(wallet.discount_percentage(), Some(29));
    }

    #[test]
    fn test_unknown_id() {
        let catalog = DemoCatalog::new().unwrap();
        assert!(catalog.find("99").is_none());
        assert!(catalog.find("").is_none());
    }
}
