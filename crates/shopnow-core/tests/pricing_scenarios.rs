//! End-to-end pricing scenarios driven through the Cart Store.

use std::str::FromStr;

use shopnow_core::pricing::{
    self, discount_amount, shipping_cost, tax_amount, taxable_amount, total_before_clamp,
};
use shopnow_core::{compute_summary, CartStore, Money, PricingPolicy, Product};

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn product(id: &str, price: &str) -> Product {
    Product::new(id, format!("Product {}", id), money(price)).unwrap()
}

#[test]
fn test_checkout_with_save20() {
    let mut store = CartStore::default();

    store.add_item(&product("1", "99.99"), 1).unwrap();
    store.add_item(&product("2", "49.99"), 2).unwrap();
    assert_eq!(store.summary().subtotal, money("199.97"));

    let outcome = store.apply_discount_code("save20");
    assert!(outcome.success);

    let summary = store.summary();
    assert_eq!(summary.subtotal, money("199.97"));
    assert_eq!(summary.discount_amount, money("39.994"));
    assert_eq!(summary.shipping, Money::zero());
    // (199.97 − 39.994) × 0.085 = 159.976 × 0.085
    assert_eq!(summary.tax, money("13.59796"));
    assert_eq!(summary.total, money("173.57396"));
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.free_shipping_remaining, Money::zero());

    // What the cart screen shows
    assert_eq!(summary.total.to_string(), "$173.57");
}

#[test]
fn test_free_shipping_boundary() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "100.00"), 1).unwrap();
    assert_eq!(store.summary().shipping, Money::zero());
    assert_eq!(store.summary().free_shipping_remaining, Money::zero());

    store.clear();
    store.add_item(&product("2", "99.99"), 1).unwrap();
    let summary = store.summary();
    assert_eq!(summary.shipping, money("9.99"));
    assert_eq!(summary.free_shipping_remaining, money("0.01"));
}

#[test]
fn test_free_shipping_ignores_discount() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "120.00"), 1).unwrap();
    store.apply_discount_code("FLAT50");

    let summary = store.summary();
    assert_eq!(summary.discount_amount, money("50"));
    assert_eq!(summary.shipping, Money::zero());
    assert_eq!(summary.tax, money("5.95"));
    assert_eq!(summary.total, money("75.95"));
}

#[test]
fn test_fixed_discount_clamp() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "30.00"), 1).unwrap();
    store.apply_discount_code("FLAT50");

    let summary = store.summary();
    assert_eq!(summary.discount_amount, money("30"));
    assert_eq!(taxable_amount(summary.subtotal, summary.discount_amount), Money::zero());
    assert_eq!(summary.tax, Money::zero());
    assert_eq!(summary.shipping, money("9.99"));
    assert_eq!(summary.total, money("9.99"));
}

#[test]
fn test_welcome10_under_threshold() {
    let mut store = CartStore::default();
    store.add_item(&product("3", "49.99"), 1).unwrap();
    store.apply_discount_code("WELCOME10");

    let summary = store.summary();
    assert_eq!(summary.discount_amount, money("4.999"));
    assert_eq!(summary.shipping, money("9.99"));
    // 44.991 × 0.085
    assert_eq!(summary.tax, money("3.824235"));
    assert_eq!(summary.total, money("58.805235"));
    assert_eq!(summary.free_shipping_remaining, money("50.01"));
}

#[test]
fn test_summary_is_deterministic() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "19.99"), 3).unwrap();
    store.apply_discount_code("SAVE20");

    let snapshot = store.snapshot();
    let first = compute_summary(&snapshot, store.policy());
    for _ in 0..10 {
        assert_eq!(compute_summary(&snapshot, store.policy()), first);
    }
    assert_eq!(store.summary(), first);
}

#[test]
fn test_summary_tracks_mutations() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "10.00"), 1).unwrap();
    let before = store.summary();

    store.set_quantity("1", 4).unwrap();
    let after = store.summary();

    assert_ne!(before, after);
    assert_eq!(after.subtotal, money("40.00"));
}

#[test]
fn test_readers_price_snapshot_in_parallel() {
    let mut store = CartStore::default();
    store.add_item(&product("1", "99.99"), 1).unwrap();
    store.add_item(&product("2", "49.99"), 2).unwrap();
    store.apply_discount_code("SAVE20");

    let snapshot = store.snapshot();
    let policy = store.policy().clone();
    let expected = store.summary();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compute_summary(&snapshot, &policy)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// The `max(0, …)` around the total is a safety net. Under the standard
/// policy the pre-clamp total is always at least shipping + tax, so the net
/// never catches anything. If this test starts failing, a policy change has
/// made negative totals reachable.
#[test]
fn test_total_clamp_is_unreachable() {
    let policy = PricingPolicy::default();
    let prices = ["0", "0.01", "9.99", "30", "49.99", "50", "99.99", "100", "250"];
    let mut codes: Vec<Option<&str>> = vec![None];
    codes.extend(["WELCOME10", "SAVE20", "FLAT50"].map(Some));

    for (i, a) in prices.iter().enumerate() {
        for b in &prices[i..] {
            for qty in 1..=3 {
                for code in &codes {
                    let mut store = CartStore::new(policy.clone()).unwrap();
                    store.add_item(&product("a", a), qty).unwrap();
                    store.add_item(&product("b", b), 1).unwrap();
                    if let Some(code) = code {
                        assert!(store.apply_discount_code(code).success);
                    }

                    let state = store.snapshot();
                    let subtotal = pricing::subtotal(&state);
                    let discount = discount_amount(subtotal, state.applied_discount());
                    let shipping = shipping_cost(subtotal, state.item_count(), &policy);
                    let tax = tax_amount(taxable_amount(subtotal, discount), policy.tax_rate);
                    let raw = total_before_clamp(subtotal, discount, shipping, tax);

                    assert!(discount <= subtotal);
                    assert!(raw >= shipping + tax, "raw total {raw} below shipping + tax");
                    assert_eq!(store.summary().total, raw);
                }
            }
        }
    }
}

#[test]
fn test_empty_cart_summary_is_all_zero() {
    let store = CartStore::default();
    let summary = store.summary();

    assert_eq!(summary.subtotal, Money::zero());
    assert_eq!(summary.discount_amount, Money::zero());
    assert_eq!(summary.shipping, Money::zero());
    assert_eq!(summary.tax, Money::zero());
    assert_eq!(summary.total, Money::zero());
    assert_eq!(summary.item_count, 0);
    assert_eq!(summary.free_shipping_remaining, money("100"));
}

#[test]
fn test_discount_on_empty_cart_takes_nothing() {
    let mut store = CartStore::default();
    assert!(store.apply_discount_code("FLAT50").success);

    let summary = store.summary();
    assert_eq!(summary.discount_amount, Money::zero());
    assert_eq!(summary.total, Money::zero());
}

#[test]
fn test_largest_accepted_cart_prices_without_overflow() {
    use shopnow_core::money::MAX_AMOUNT;

    let policy = PricingPolicy {
        free_shipping_threshold: MAX_AMOUNT,
        flat_shipping: MAX_AMOUNT,
        ..PricingPolicy::default()
    };
    let mut store = CartStore::new(policy).unwrap();
    let tenth = money("100000000000000000000000");
    store.add_item(&product("1", "100000000000000000000000"), 9).unwrap();
    assert!(store.apply_discount_code("SAVE20").success);

    let summary = store.summary();
    let subtotal = tenth.multiply_quantity(9);
    assert_eq!(summary.subtotal, subtotal);
    assert_eq!(summary.shipping, MAX_AMOUNT);
    assert_eq!(
        summary.total,
        subtotal - summary.discount_amount + MAX_AMOUNT + summary.tax
    );

    // Two more units would push the subtotal past the ceiling
    assert!(store.add_item(&product("1", "1"), 2).is_err());
    assert_eq!(store.summary(), summary);
}

#[test]
fn test_fees_above_ceiling_rejected() {
    use shopnow_core::money::MAX_AMOUNT;

    let policy = PricingPolicy {
        flat_shipping: MAX_AMOUNT + Money::from_cents(1),
        ..PricingPolicy::default()
    };
    assert!(CartStore::new(policy).is_err());
}
