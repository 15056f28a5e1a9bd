//! Cart store: client-held line items replicated to key/value storage.
//!
//! DESIGN
//! ======
//! At most one [`CartLine`] per product id, every quantity at least 1. Each
//! mutation writes the whole line array under [`CART_KEY`] before returning;
//! the total is computed on read and never stored. The cart never talks to
//! the network; [`crate::checkout`] hands its lines to the order endpoint.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::storage::{CART_KEY, KeyValueStore, load_json, save_json};
use crate::types::{Item, ItemId, OrderLineRequest};

/// One product's aggregated quantity. Persisted as `{id, name, price, quantity}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ItemId,
    pub name: String,
    #[serde(rename = "price", serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Persisted line as read back; tolerant of hand-edited or older data.
#[derive(Deserialize)]
struct StoredLine {
    id: ItemId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: Decimal,
    #[serde(default = "one")]
    quantity: i64,
}

fn one() -> i64 {
    1
}

#[derive(Clone, Debug)]
pub struct Cart<S> {
    store: S,
    lines: Vec<CartLine>,
}

impl<S: KeyValueStore> Cart<S> {
    /// An empty cart that has not read `store` yet. The first mutation
    /// overwrites whatever is persisted.
    pub fn new(store: S) -> Self {
        Self { store, lines: Vec::new() }
    }

    /// Rehydrate from `store`. A missing or malformed entry yields an empty
    /// cart; duplicate ids are merged and quantities lifted to 1.
    pub fn load(store: S) -> Self {
        let stored: Vec<StoredLine> = load_json(&store, CART_KEY).unwrap_or_default();
        let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
        for entry in stored {
            let quantity = u32::try_from(entry.quantity.max(1)).unwrap_or(u32::MAX);
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == entry.id) {
                line.quantity = line.quantity.saturating_add(quantity);
            } else {
                lines.push(CartLine {
                    product_id: entry.id,
                    name: entry.name,
                    unit_price: entry.price,
                    quantity,
                });
            }
        }
        Self { store, lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().fold(0_u32, |n, l| n.saturating_add(l.quantity))
    }

    /// Σ unit price × quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add `quantity` units of `item`, merging into an existing line. A zero
    /// quantity counts as one.
    pub fn add(&mut self, item: &Item, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: item.id,
                name: item.name.clone(),
                unit_price: item.price,
                quantity,
            });
        }
        self.persist();
    }

    /// Set a line's quantity, clamped to at least 1. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: ItemId, quantity: u32) {
        self.update(product_id, |_| quantity.max(1));
    }

    pub fn increment(&mut self, product_id: ItemId) {
        self.update(product_id, |q| q.saturating_add(1));
    }

    /// Decrease by one; stops at 1 rather than removing the line.
    pub fn decrement(&mut self, product_id: ItemId) {
        self.update(product_id, |q| q.saturating_sub(1).max(1));
    }

    pub fn remove(&mut self, product_id: ItemId) {
        self.lines.retain(|l| l.product_id != product_id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// `{item_id, quantity}` pairs for order creation.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLineRequest> {
        self.lines
            .iter()
            .map(|l| OrderLineRequest { item_id: l.product_id, quantity: l.quantity })
            .collect()
    }

    fn update(&mut self, product_id: ItemId, f: impl FnOnce(u32) -> u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = f(line.quantity);
        }
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = save_json(&self.store, CART_KEY, &self.lines) {
            tracing::warn!(error = %err, lines = self.lines.len(), "failed to persist cart");
        }
    }
}

/// Read a quantity typed into a form: the leading integer, 1 when there is
/// none, never below 1.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || negative {
        return 1;
    }
    digits.parse::<u32>().map_or(u32::MAX, |n| n.max(1))
}
