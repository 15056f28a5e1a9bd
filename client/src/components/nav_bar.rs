//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Visible only with a session. Admin links appear for admins only; the cart
//! link carries the live item count. Sign-out clears the session and replaces
//! history with `/auth` at once; the server-side revoke follows in the
//! background (best effort).

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use shop::SessionState;
use shop::session::revoke_token;

use crate::net::api::shop_client;
use crate::state::cart::BrowserCart;
use crate::state::session::session_store;
use crate::util::auth::{SIGN_IN_PATH, replace_history};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let cart = expect_context::<RwSignal<BrowserCart>>();
    let navigate = use_navigate();

    let identity = move || {
        session.with(|state| {
            state
                .user
                .as_ref()
                .map(|user| (user.display_name(), user.role.as_str().to_owned()))
                .unwrap_or_default()
        })
    };
    let cart_count = move || cart.with(BrowserCart::item_count);

    let on_sign_out = move |_| {
        let mut store = session_store(session);
        let token = store.end_session();
        session.set(store.into_state());
        navigate(SIGN_IN_PATH, replace_history());
        if let Some(token) = token {
            leptos::task::spawn_local(async move {
                revoke_token(&shop_client(), &token).await;
            });
        }
    };

    view! {
        <Show when=move || session.with(SessionState::is_authenticated)>
            <nav class="nav-bar">
                <A href="/catalog">"Catalog"</A>
                <A href="/cart">"Cart (" {cart_count} ")"</A>
                <A href="/orders">"Orders"</A>
                <A href="/profile">"Profile"</A>
                <Show when=move || session.with(SessionState::is_admin)>
                    <A href="/admin/items">"Items"</A>
                    <A href="/admin/users">"Users"</A>
                </Show>
                <span class="nav-bar__spacer"></span>
                <span class="nav-bar__user">
                    {move || identity().0}
                    " ("
                    <span class="nav-bar__role">{move || identity().1}</span>
                    ")"
                </span>
                <button class="btn nav-bar__sign-out" on:click=on_sign_out.clone()>
                    "Sign out"
                </button>
            </nav>
        </Show>
    }
}
