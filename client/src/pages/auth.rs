//! `/auth`: sign-in and registration tabs.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only public route. A successful sign-in or registration publishes the
//! new session, raises a toast, and replaces history with `/catalog`. Failures
//! show the normalized auth message inline; the session store has already
//! cleared any stale token by then.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use shop::forms::{INVALID_EMAIL_MESSAGE, is_valid_email};
use shop::types::Registration;
use shop::{Notifier, SessionState};

use crate::components::error_alert::ErrorAlert;
use crate::state::session::session_store;
use crate::state::ui::UiNotifier;
use crate::util::auth::{CATALOG_PATH, replace_history};

pub const SIGNED_IN_MESSAGE: &str = "Signed in successfully";
pub const REGISTERED_MESSAGE: &str = "Account created";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    SignIn,
    Register,
}

impl AuthTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Register",
        }
    }
}

/// Fields of the registration tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterFields {
    /// Trimmed request body. Passwords are sent as typed.
    pub fn to_registration(&self) -> Registration {
        Registration {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
        }
    }
}

/// Local checks shared by both tabs, run before any request.
///
/// # Errors
///
/// Returns the message to show inline.
pub fn check_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS_MESSAGE);
    }
    if !is_valid_email(email) {
        return Err(INVALID_EMAIL_MESSAGE);
    }
    Ok(())
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notifier = UiNotifier::from_context();
    let navigate = use_navigate();

    let tab = RwSignal::new(AuthTab::default());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let register = RwSignal::new(RegisterFields::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let navigate_signed_in = navigate.clone();
    Effect::new(move || {
        if session.with(SessionState::is_authenticated) && !busy.get() {
            navigate_signed_in(CATALOG_PATH, replace_history());
        }
    });

    let select_tab = move |next: AuthTab| {
        tab.set(next);
        error.set(None);
    };

    let navigate_login = navigate.clone();
    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = check_credentials(&email_value, &password_value) {
            error.set(Some(message.to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        let navigate = navigate_login.clone();
        leptos::task::spawn_local(async move {
            let mut store = session_store(session);
            let result = store.login(&email_value, &password_value).await;
            session.set(store.into_state());
            busy.set(false);
            match result {
                Ok(_) => {
                    notifier.success(SIGNED_IN_MESSAGE);
                    navigate(CATALOG_PATH, replace_history());
                }
                Err(err) => error.set(Some(err.message)),
            }
        });
    };

    let navigate_register = navigate;
    let on_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let registration = register.get_untracked().to_registration();
        if let Err(message) = check_credentials(&registration.email, &registration.password) {
            error.set(Some(message.to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        let navigate = navigate_register.clone();
        leptos::task::spawn_local(async move {
            let mut store = session_store(session);
            let result = store.register(&registration).await;
            session.set(store.into_state());
            busy.set(false);
            match result {
                Ok(_) => {
                    notifier.success(REGISTERED_MESSAGE);
                    navigate(CATALOG_PATH, replace_history());
                }
                Err(err) => error.set(Some(err.message)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Shop"</h1>
                <div class="tabs" role="tablist">
                    {[AuthTab::SignIn, AuthTab::Register]
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || tab.get() == t
                                    on:click=move |_| select_tab(t)
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <ErrorAlert message=error/>

                <Show
                    when=move || tab.get() == AuthTab::SignIn
                    fallback=move || {
                        view! {
                            <form class="auth-form" on:submit=on_register.clone()>
                                <input
                                    type="text"
                                    placeholder="First name"
                                    prop:value=move || register.with(|f| f.first_name.clone())
                                    on:input=move |ev| register.update(|f| f.first_name = event_target_value(&ev))
                                />
                                <input
                                    type="text"
                                    placeholder="Last name"
                                    prop:value=move || register.with(|f| f.last_name.clone())
                                    on:input=move |ev| register.update(|f| f.last_name = event_target_value(&ev))
                                />
                                <input
                                    type="email"
                                    placeholder="you@example.com"
                                    prop:value=move || register.with(|f| f.email.clone())
                                    on:input=move |ev| register.update(|f| f.email = event_target_value(&ev))
                                />
                                <input
                                    type="password"
                                    placeholder="Password"
                                    prop:value=move || register.with(|f| f.password.clone())
                                    on:input=move |ev| register.update(|f| f.password = event_target_value(&ev))
                                />
                                <input
                                    type="password"
                                    placeholder="Confirm password"
                                    prop:value=move || {
                                        register.with(|f| f.password_confirmation.clone())
                                    }
                                    on:input=move |ev| register.update(|f| f.password_confirmation = event_target_value(&ev))
                                />
                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                    "Create account"
                                </button>
                            </form>
                        }
                    }
                >
                    <form class="auth-form" on:submit=on_sign_in.clone()>
                        <input
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Sign in"
                        </button>
                    </form>
                </Show>
            </div>
        </div>
    }
}
