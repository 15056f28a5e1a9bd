//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` adapts `gloo-net` to the shop transport seam; `api` builds the
//! configured `ApiClient` every page talks through.

pub mod api;
pub mod transport;
