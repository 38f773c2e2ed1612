//! # Session Cart
//!
//! The serialization point for cart mutations.
//!
//! `CartStore` mutates through `&mut self`, which is enough inside one
//! thread. A host where a UI event and a background task can both touch the
//! cart shares it behind `Arc<Mutex<_>>`; this type is that boundary.
//!
//! ## Cart Operations Flow
//! ```text
//! Command                 SessionCart               Cart Store
//! ───────                 ───────────               ──────────
//! add_to_cart() ────────► with_cart_mut() ────────► add_item()
//! update_cart_item() ───► with_cart_mut() ────────► set_quantity()
//! get_cart() ───────────► with_cart() ────────────► snapshot()
//! ```
//!
//! Readers that only need to price a snapshot should take
//! [`SessionCart::snapshot`] and release the lock immediately.

use std::sync::{Arc, Mutex, MutexGuard};

use shopnow_core::{CartState, CartStore};
use tracing::warn;

/// Shared handle to the session's cart.
#[derive(Debug, Clone)]
pub struct SessionCart {
    store: Arc<Mutex<CartStore>>,
}

impl SessionCart {
    /// Wraps a freshly constructed store.
    pub fn new(store: CartStore) -> Self {
        SessionCart {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = cart.with_cart(|store| store.summary());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart.with_cart_mut(|store| store.add_item(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    /// The current snapshot, with the lock held only for the `Arc` clone.
    pub fn snapshot(&self) -> Arc<CartState> {
        self.lock().snapshot()
    }

    /// Every mutation replaces the state wholesale, so a panic inside a
    /// closure cannot leave a half-edited cart behind; a poisoned lock still
    /// guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.store.lock().unwrap_or_else(|poisoned| {
            warn!("cart mutex was poisoned; continuing with last committed state");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopnow_core::{Money, Product};

    fn product(id: &str) -> Product {
        Product::new(id, "Thing", Money::from_cents(500)).unwrap()
    }

    #[test]
    fn test_mutations_visible_to_clones() {
        let cart = SessionCart::new(CartStore::default());
        let other = cart.clone();

        cart.with_cart_mut(|s| s.add_item(&product("1"), 2)).unwrap();

        assert_eq!(other.with_cart(|s| s.quantity_of("1")), 2);
        assert_eq!(other.snapshot().item_count(), 2);
    }

    #[test]
    fn test_concurrent_writers_are_serialized() {
        let cart = SessionCart::new(CartStore::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cart = cart.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        cart.with_cart_mut(|s| s.add_item(&product("1"), 1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cart.with_cart(|s| s.item_count()), 200);
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        let cart = SessionCart::new(CartStore::default());
        cart.with_cart_mut(|s| s.add_item(&product("1"), 1)).unwrap();

        let poisoner = cart.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with_cart_mut(|_| panic!("boom"));
        })
        .join();

        assert_eq!(cart.with_cart(|s| s.quantity_of("1")), 1);
    }
}
