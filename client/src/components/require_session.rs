//! Route guard wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages render inside `RequireSession`. It shows a loading line
//! until the session settles, then either renders the page or redirects
//! according to `util::auth::route_access`.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use shop::SessionState;

use crate::util::auth::{RouteAccess, SIGN_IN_PATH, route_access};

#[component]
pub fn RequireSession(
    /// Also require the admin role.
    #[prop(optional)]
    admin: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    // Memoized so profile edits do not remount the guarded page.
    let access = Memo::new(move |_| session.with(|state| route_access(state, admin)));

    move || match access.get() {
        RouteAccess::Loading => view! { <p class="page-status">"Loading…"</p> }.into_any(),
        RouteAccess::Allowed => children().into_any(),
        denied => {
            let path = denied.redirect_to().unwrap_or(SIGN_IN_PATH);
            view! { <Redirect path=path/> }.into_any()
        }
    }
}
