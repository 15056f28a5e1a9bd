use super::*;
use shop::money::Decimal;
use shop::types::Item;

fn lamp() -> Item {
    Item { id: 5, name: "Lamp".to_owned(), description: None, price: Decimal::new(1000, 2) }
}

#[test]
fn order_heading_shows_id_and_amount() {
    let order = Order { id: 12, amount: Decimal::new(3000, 2), created_at: None, lines: Vec::new() };
    assert_eq!(order_heading(&order), "Order #12 · $30.00");
}

#[test]
fn order_line_text_uses_embedded_item() {
    let line = OrderLine { id: 1, quantity: 2, item: Some(lamp()) };
    assert_eq!(order_line_text(&line), "Lamp × 2 · $20.00");
}

#[test]
fn order_line_text_falls_back_to_line_id() {
    let line = OrderLine { id: 9, quantity: 3, item: None };
    assert_eq!(order_line_text(&line), "Item #9 × 3");
}
