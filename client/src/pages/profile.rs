//! `/profile`: edit the signed-in account and delete it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form validates live and only sends the fields that differ from the
//! held user. Deleting the account requires typing its email; on success the
//! session is cleared and history is replaced with `/auth`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use shop::profile::{ProfileForm, delete_account, save_profile};
use shop::{Notifier, SessionState};

use crate::components::error_alert::FieldError;
use crate::components::require_session::RequireSession;
use crate::state::session::session_store;
use crate::state::ui::UiNotifier;
use crate::util::auth::{SIGN_IN_PATH, replace_history};

pub const DELETE_ACCOUNT_PROMPT: &str = "Delete your account? This cannot be undone.";

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireSession>
            <Profile/>
        </RequireSession>
    }
}

fn field_error(form: RwSignal<ProfileForm>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || form.with(|f| f.validate().get(field).map(str::to_owned)))
}

#[component]
fn Profile() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notifier = UiNotifier::from_context();
    let navigate = use_navigate();

    let initial = session.with_untracked(|s| s.user.as_ref().map(ProfileForm::from_user).unwrap_or_default());
    let form = RwSignal::new(initial);
    let confirm_email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        leptos::task::spawn_local(async move {
            let mut store = session_store(session);
            let mut working = form.get_untracked();
            if let Ok(Some(_)) = save_profile(&mut store, &mut working, &notifier).await {
                form.set(working);
            }
            session.set(store.into_state());
            busy.set(false);
        });
    };

    let on_delete = move |_| {
        if busy.get_untracked() || !notifier.confirm(DELETE_ACCOUNT_PROMPT) {
            return;
        }
        busy.set(true);
        let typed = confirm_email.get_untracked();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let mut store = session_store(session);
            let deleted = delete_account(&mut store, &typed, &notifier).await.is_ok();
            session.set(store.into_state());
            busy.set(false);
            if deleted {
                navigate(SIGN_IN_PATH, replace_history());
            }
        });
    };

    view! {
        <section class="profile-page">
            <h2>"Profile"</h2>
            <form class="profile-form" on:submit=on_save>
                <label>
                    "First name"
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.first_name.clone())
                        on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Last name"
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.last_name.clone())
                        on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <FieldError message=field_error(form, "email")/>
                </label>
                <label>
                    "New password"
                    <input
                        type="password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <FieldError message=field_error(form, "password")/>
                </label>
                <label>
                    "Confirm password"
                    <input
                        type="password"
                        prop:value=move || form.with(|f| f.password_confirmation.clone())
                        on:input=move |ev| form.update(|f| f.password_confirmation = event_target_value(&ev))
                    />
                    <FieldError message=field_error(form, "password_confirmation")/>
                </label>
                <button
                    class="btn btn--primary"
                    type="submit"
                    disabled=move || busy.get() || !form.with(ProfileForm::can_submit)
                >
                    "Save"
                </button>
            </form>

            <div class="danger-zone">
                <h3>"Delete account"</h3>
                <p>"Type your email to confirm."</p>
                <input
                    type="email"
                    prop:value=move || confirm_email.get()
                    on:input=move |ev| confirm_email.set(event_target_value(&ev))
                />
                <button class="btn btn--danger" on:click=on_delete disabled=move || busy.get()>
                    "Delete account"
                </button>
            </div>
        </section>
    }
}
