//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render storefront chrome (navigation, toasts, alerts, route
//! guards) while reading shared state from Leptos context providers.

pub mod error_alert;
pub mod nav_bar;
pub mod require_session;
pub mod toast_stack;
