use super::*;

use rust_decimal::Decimal;
use serde_json::json;

use crate::error::ErrorBody;
use crate::notify::NoticeKind;
use crate::storage::MemoryStore;
use crate::support::{RecordingNotifier, client};
use crate::types::Item;

fn filled_cart() -> Cart<MemoryStore> {
    let mut cart = Cart::load(MemoryStore::new());
    let mug = Item { id: 3, name: "Mug".to_owned(), description: None, price: Decimal::new(500, 2) };
    cart.add(&mug, 2);
    cart
}

#[tokio::test]
async fn empty_cart_fails_locally() {
    let (api, transport, _store) = client();
    let mut cart = Cart::load(MemoryStore::new());
    let notifier = RecordingNotifier::default();

    let err = checkout(&api, &mut cart, &notifier).await.unwrap_err();

    assert_eq!(err, ApiError::Validation(EMPTY_CART_MESSAGE.to_owned()));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn success_notifies_and_clears_cart() {
    let (api, transport, _store) = client();
    transport.reply(201, json!({"id": 17, "amount": 10}));
    let mut cart = filled_cart();
    let notifier = RecordingNotifier::default();

    let order = checkout(&api, &mut cart, &notifier).await.unwrap().unwrap();

    assert_eq!(order.id, 17);
    assert!(cart.is_empty());
    assert_eq!(notifier.notices(), vec![("Order #17 placed".to_owned(), NoticeKind::Success)]);
    assert_eq!(
        transport.requests()[0].body,
        Some(json!({"items": [{"item_id": 3, "quantity": 2}]}))
    );
}

#[tokio::test]
async fn empty_success_body_still_clears_cart() {
    let (api, transport, _store) = client();
    transport.reply_raw(201, "");
    let mut cart = filled_cart();
    let notifier = RecordingNotifier::default();

    let order = checkout(&api, &mut cart, &notifier).await.unwrap();

    assert_eq!(order, None);
    assert!(cart.is_empty());
    assert_eq!(notifier.notices(), vec![("Order placed".to_owned(), NoticeKind::Success)]);
}

#[tokio::test]
async fn wrapped_order_body_is_unwrapped() {
    let (api, transport, _store) = client();
    transport.reply(201, json!({"order": {"id": 5, "amount": 10}}));
    let mut cart = filled_cart();
    let notifier = RecordingNotifier::default();

    let order = checkout(&api, &mut cart, &notifier).await.unwrap();

    assert_eq!(order.map(|o| o.id), Some(5));
    assert!(cart.is_empty());
    assert_eq!(notifier.notices(), vec![("Order #5 placed".to_owned(), NoticeKind::Success)]);
}

#[tokio::test]
async fn non_json_success_body_still_clears_cart() {
    let (api, transport, _store) = client();
    transport.reply_raw(200, "<html>created</html>");
    let mut cart = filled_cart();
    let notifier = RecordingNotifier::default();

    assert_eq!(checkout(&api, &mut cart, &notifier).await.unwrap(), None);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn failure_leaves_cart_untouched() {
    let (api, transport, _store) = client();
    transport.reply(422, json!({"message": "Item 3 is out of stock"}));
    let mut cart = filled_cart();
    let notifier = RecordingNotifier::default();

    let err = checkout(&api, &mut cart, &notifier).await.unwrap_err();

    assert_eq!(checkout_error_message(&err), "Item 3 is out of stock");
    assert_eq!(cart.item_count(), 2);
    assert!(notifier.notices().is_empty());
}

#[test]
fn error_message_uses_status_line_when_server_is_silent() {
    let err = ApiError::Status { status: 500, body: ErrorBody::default() };
    assert_eq!(checkout_error_message(&err), "500 Internal Server Error");
    assert_eq!(
        checkout_error_message(&ApiError::Validation(String::new())),
        CHECKOUT_FALLBACK_MESSAGE
    );
}
