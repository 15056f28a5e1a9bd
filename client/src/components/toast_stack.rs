//! Toast overlay fed by `UiState`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Store operations notify through `UiNotifier`, which queues toasts here and
//! removes them on a timer. Clicking a toast dismisses it early.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || ui.get().toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast toast--{}", toast.kind.as_str())
                            on:click=move |_| ui.update(|u| u.dismiss_toast(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
