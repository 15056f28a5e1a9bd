use super::*;

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::storage::MemoryStore;

fn item(id: ItemId, name: &str, cents: i64) -> Item {
    Item { id, name: name.to_owned(), description: None, price: Decimal::new(cents, 2) }
}

fn stored(store: &MemoryStore) -> Value {
    serde_json::from_str(&store.get(CART_KEY).unwrap()).unwrap()
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn adding_same_product_twice_merges_into_one_line() {
    let mut cart = Cart::load(MemoryStore::new());
    let a = item(1, "A", 1000);

    cart.add(&a, 1);
    cart.add(&a, 2);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.total(), Decimal::new(3000, 2));
}

#[test]
fn add_with_zero_quantity_adds_one() {
    let mut cart = Cart::load(MemoryStore::new());
    cart.add(&item(1, "A", 100), 0);
    assert_eq!(cart.line(1).map(|l| l.quantity), Some(1));
}

#[test]
fn set_quantity_clamps_to_one_and_ignores_unknown_ids() {
    let mut cart = Cart::load(MemoryStore::new());
    cart.add(&item(1, "A", 100), 4);

    cart.set_quantity(1, 0);
    assert_eq!(cart.line(1).map(|l| l.quantity), Some(1));

    cart.set_quantity(1, 7);
    cart.set_quantity(99, 3);
    assert_eq!(cart.line(1).map(|l| l.quantity), Some(7));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn decrement_floors_at_one_instead_of_removing() {
    let mut cart = Cart::load(MemoryStore::new());
    cart.add(&item(1, "A", 100), 2);

    cart.decrement(1);
    cart.decrement(1);
    cart.decrement(1);

    assert_eq!(cart.line(1).map(|l| l.quantity), Some(1));
    cart.increment(1);
    assert_eq!(cart.line(1).map(|l| l.quantity), Some(2));
}

#[test]
fn remove_and_clear_drop_lines() {
    let mut cart = Cart::load(MemoryStore::new());
    cart.add(&item(1, "A", 100), 1);
    cart.add(&item(2, "B", 250), 2);

    cart.remove(1);
    assert_eq!(cart.order_lines(), vec![OrderLineRequest { item_id: 2, quantity: 2 }]);
    assert_eq!(cart.item_count(), 2);

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
    assert_eq!(stored(cart.store()), json!([]));
}

#[test]
fn mixed_mutation_sequence_keeps_ids_unique_and_quantities_positive() {
    let mut cart = Cart::load(MemoryStore::new());
    let products = [item(1, "A", 199), item(2, "B", 1000), item(3, "C", 5)];

    for step in 0_u32..60 {
        let p = &products[(step % 3) as usize];
        match step % 5 {
            0 => cart.add(p, step % 4),
            1 => cart.increment(p.id),
            2 => cart.decrement(p.id),
            3 => cart.set_quantity(p.id, step % 3),
            _ => cart.decrement(p.id),
        }

        let ids: HashSet<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids.len(), cart.lines().len());
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));

        let expected: Decimal =
            cart.lines().iter().map(|l| l.unit_price * Decimal::from(l.quantity)).sum();
        assert_eq!(cart.total(), expected);
    }
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn every_mutation_is_persisted_with_wire_field_names() {
    let store = MemoryStore::new();
    let mut cart = Cart::load(store.clone());

    cart.add(&item(7, "Mug", 1050), 2);

    assert_eq!(stored(&store), json!([{"id": 7, "name": "Mug", "price": 10.5, "quantity": 2}]));

    cart.increment(7);
    assert_eq!(stored(&store)[0]["quantity"], json!(3));
}

#[test]
fn persisted_cart_round_trips() {
    let store = MemoryStore::new();
    let mut cart = Cart::load(store.clone());
    cart.add(&item(1, "A", 1000), 1);
    cart.add(&item(2, "B", 1999), 3);

    let reloaded = Cart::load(store);

    assert_eq!(reloaded.lines(), cart.lines());
    assert_eq!(reloaded.total(), cart.total());
}

#[test]
fn rehydration_tolerates_missing_and_malformed_state() {
    assert!(Cart::load(MemoryStore::new()).is_empty());

    let store = MemoryStore::new();
    store.set(CART_KEY, "not json").unwrap();
    assert!(Cart::load(store).is_empty());
}

#[test]
fn rehydration_merges_duplicates_and_lifts_zero_quantities() {
    let store = MemoryStore::new();
    store
        .set(
            CART_KEY,
            r#"[{"id":1,"name":"A","price":"2.50","quantity":0},
                {"id":1,"name":"A","price":2.5,"quantity":2},
                {"id":2,"name":"B","price":1}]"#,
        )
        .unwrap();

    let cart = Cart::load(store);

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.line(1).map(|l| l.quantity), Some(3));
    assert_eq!(cart.line(2).map(|l| l.quantity), Some(1));
    assert_eq!(cart.total(), Decimal::new(850, 2));
}

// =============================================================
// parse_quantity
// =============================================================

#[test]
fn parse_quantity_reads_leading_integer() {
    assert_eq!(parse_quantity("4"), 4);
    assert_eq!(parse_quantity(" 12abc"), 12);
    assert_eq!(parse_quantity("2.9"), 2);
}

#[test]
fn parse_quantity_falls_back_to_one() {
    assert_eq!(parse_quantity(""), 1);
    assert_eq!(parse_quantity("abc"), 1);
    assert_eq!(parse_quantity("0"), 1);
    assert_eq!(parse_quantity("-5"), 1);
}
