//! Reactive state held in Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one `RwSignal` per concern: the session snapshot, the cart,
//! and UI chrome (toasts). Pages rebuild shop stores around these snapshots
//! for each action and write the resulting state back.

pub mod cart;
pub mod session;
pub mod ui;
