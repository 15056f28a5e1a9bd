//! Inline error banner for form and list failures.

use leptos::prelude::*;

/// Renders `message` in an alert box while it is `Some`.
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="alert alert--error" role="alert">
                {move || message.get().unwrap_or_default()}
            </p>
        </Show>
    }
}

/// Inline hint under a single form field.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <small class="field-error">{move || message.get().unwrap_or_default()}</small>
        </Show>
    }
}
