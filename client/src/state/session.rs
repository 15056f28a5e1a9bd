//! Browser session wiring.
//!
//! DESIGN
//! ======
//! The signal holds a plain `SessionState`. An action builds a
//! `SessionStore` around the current snapshot, awaits the store operation,
//! and publishes the resulting state. Only one action runs per user gesture,
//! so snapshots are never raced.

use leptos::prelude::*;
use shop::{SessionState, SessionStore};

use crate::net::api::shop_client;
use crate::net::transport::GlooTransport;
use crate::util::storage::BrowserStorage;

pub type BrowserSession = SessionStore<GlooTransport, BrowserStorage>;

/// A store seeded with the current snapshot (read untracked).
pub fn session_store(session: RwSignal<SessionState>) -> BrowserSession {
    SessionStore::with_state(shop_client(), session.get_untracked())
}

/// Resolve the persisted token once after hydration.
pub fn bootstrap(session: RwSignal<SessionState>) {
    session.set(SessionState::loading());
    leptos::task::spawn_local(async move {
        let mut store = session_store(session);
        store.bootstrap().await;
        #[cfg(feature = "hydrate")]
        log::info!("session bootstrap settled: {:?}", store.state().phase);
        session.set(store.into_state());
    });
}
