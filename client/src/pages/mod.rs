//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, form signals, store
//! actions) and delegates rendering of shared chrome to `components`.
//! Protected pages wrap their body in `RequireSession`.

pub mod admin_items;
pub mod admin_users;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod orders;
pub mod profile;
