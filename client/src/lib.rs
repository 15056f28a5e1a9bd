//! # client
//!
//! Leptos + WASM storefront UI: sign-in, catalog, cart, orders, profile and
//! the admin item/user screens.
//!
//! All domain behavior (REST calls, session and cart stores, form rules)
//! lives in the `shop` crate. This crate supplies the browser side of its
//! seams (`gloo-net` transport, `localStorage` storage, toast notifier) and
//! renders pages around reactive copies of the store state.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;


/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
