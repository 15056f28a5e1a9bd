//! Shared storefront core used by both the browser `client` and the `cli`.
//!
//! This crate owns the REST wire types, the error taxonomy, and the two
//! stateful stores (session and cart). Everything environment-specific sits
//! behind two seams: [`transport::Transport`] for HTTP and
//! [`storage::KeyValueStore`] for durable local state. The browser plugs in
//! `gloo-net` + `localStorage`; the CLI plugs in `reqwest` + files.

pub mod admin;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod forms;
pub mod money;
pub mod notify;
pub mod profile;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

#[cfg(test)]
#[path = "support_test.rs"]
pub(crate) mod support;

pub use api::ApiClient;
pub use cart::{Cart, CartLine};
pub use error::{ApiError, AuthError, ErrorBody};
pub use notify::{NoticeKind, Notifier};
pub use session::{SessionPhase, SessionState, SessionStore};
pub use storage::{CART_KEY, FileStore, KeyValueStore, MemoryStore, StorageError, TOKEN_KEY};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
