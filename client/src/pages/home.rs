//! `/`: send the visitor to the catalog or to sign-in.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use shop::SessionState;

use crate::util::auth::home_target;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let target = Memo::new(move |_| session.with(home_target));

    move || match target.get() {
        Some(path) => view! { <Redirect path=path/> }.into_any(),
        None => view! { <p class="page-status">"Loading…"</p> }.into_any(),
    }
}
