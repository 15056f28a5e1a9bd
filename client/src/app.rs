//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the Axum server for SSR; `App` is hydrated in the
//! browser. The session renders as loading on the server and the cart as
//! empty; both are restored from `localStorage` by effects that only run
//! after hydration.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use shop::SessionState;

use crate::components::nav_bar::NavBar;
use crate::components::toast_stack::ToastStack;
use crate::pages::{
    admin_items::AdminItemsPage, admin_users::AdminUsersPage, auth::AuthPage, cart::CartPage,
    catalog::CatalogPage, home::HomePage, orders::OrdersPage, profile::ProfilePage,
};
use crate::state::cart::{self, empty_cart};
use crate::state::session;
use crate::state::ui::UiState;
use crate::util::auth::SIGN_IN_PATH;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, cart and UI contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session_state = RwSignal::new(SessionState::default());
    let cart_state = RwSignal::new(empty_cart());
    let ui = RwSignal::new(UiState::default());

    provide_context(session_state);
    provide_context(cart_state);
    provide_context(ui);

    Effect::new(move || {
        cart::restore(cart_state);
        session::bootstrap(session_state);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/shop.css"/>
        <Title text="Shop"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| view! { <Redirect path=SIGN_IN_PATH/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/auth") view=AuthPage/>
                    <Route path=path!("/catalog") view=CatalogPage/>
                    <Route path=path!("/cart") view=CartPage/>
                    <Route path=path!("/orders") view=OrdersPage/>
                    <Route path=path!("/profile") view=ProfilePage/>
                    <Route path=path!("/admin/items") view=AdminItemsPage/>
                    <Route path=path!("/admin/users") view=AdminUsersPage/>
                </Routes>
            </main>
            <ToastStack/>
        </Router>
    }
}
