//! Browser cart wiring.
//!
//! The cart signal starts empty so the server render and the first client
//! render agree; [`restore`] loads `localStorage` once hydration is done.

use leptos::prelude::*;
use shop::Cart;

use crate::util::storage::BrowserStorage;

pub type BrowserCart = Cart<BrowserStorage>;

pub fn empty_cart() -> BrowserCart {
    Cart::new(BrowserStorage)
}

pub fn restore(cart: RwSignal<BrowserCart>) {
    cart.set(Cart::load(BrowserStorage));
}
