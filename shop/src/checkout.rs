//! Turning the cart into an order.

#[cfg(test)]
#[path = "checkout_test.rs"]
mod checkout_test;

use crate::api::ApiClient;
use crate::cart::Cart;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::storage::KeyValueStore;
use crate::transport::Transport;
use crate::types::Order;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";
pub const CHECKOUT_FALLBACK_MESSAGE: &str = "Checkout failed";

/// Toast text for a placed order. The number is shown when the server sent
/// the order back.
#[must_use]
pub fn order_placed_message(order: Option<&Order>) -> String {
    match order {
        Some(order) => format!("Order #{} placed", order.id),
        None => "Order placed".to_owned(),
    }
}

/// Submit the cart as an order. Any 2xx clears the cart and notifies the
/// user, whether or not the body carried the order; on failure the cart is
/// left exactly as it was.
///
/// # Errors
///
/// Fails with [`ApiError::Validation`] for an empty cart (no request is
/// sent), or with the order request's failure.
pub async fn checkout<T, S, C>(
    client: &ApiClient<T, S>,
    cart: &mut Cart<C>,
    notifier: &impl Notifier,
) -> Result<Option<Order>, ApiError>
where
    T: Transport,
    S: KeyValueStore,
    C: KeyValueStore,
{
    if cart.is_empty() {
        return Err(ApiError::Validation(EMPTY_CART_MESSAGE.to_owned()));
    }

    let order = client.create_order(&cart.order_lines()).await?;
    tracing::info!(order_id = ?order.as_ref().map(|o| o.id), total = %cart.total(), "order placed");
    notifier.success(&order_placed_message(order.as_ref()));
    cart.clear();
    Ok(order)
}

/// Display text for a failed checkout.
#[must_use]
pub fn checkout_error_message(err: &ApiError) -> String {
    err.message_or(CHECKOUT_FALLBACK_MESSAGE)
}
