//! `/admin/users`: user list with live search, inline editor, and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin-only. The full list is fetched once and filtered locally with
//! `shop::admin::filter_users`. Deleting your own account from here is
//! refused before any prompt.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use leptos::prelude::*;
use shop::admin::{DeleteOutcome, FormMode, SAVE_FALLBACK_MESSAGE, UserForm, delete_user, filter_users, save_user};
use shop::types::{Role, User, UserId};
use shop::{ApiError, Notifier, SessionState};

use crate::components::error_alert::ErrorAlert;
use crate::components::require_session::RequireSession;
use crate::net::api::shop_client;
use crate::state::ui::UiNotifier;

pub const LOAD_USERS_FALLBACK: &str = "Failed to load users";

/// Roles offered by the editor's select.
pub const ROLE_CHOICES: [Role; 2] = [Role::User, Role::Admin];

/// Parse the select's value back into a role.
pub fn role_from_choice(raw: &str) -> Role {
    Role::from(raw.to_owned())
}

/// Full name or `-` for the list's name column.
pub fn name_cell(user: &User) -> String {
    let full = format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or_default(),
        user.last_name.as_deref().unwrap_or_default()
    );
    let full = full.trim();
    if full.is_empty() { "-".to_owned() } else { full.to_owned() }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    view! {
        <RequireSession admin=true>
            <AdminUsers/>
        </RequireSession>
    }
}

#[component]
fn AdminUsers() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notifier = UiNotifier::from_context();

    let query = RwSignal::new(String::new());
    let users = RwSignal::new(Vec::<User>::new());
    let error = RwSignal::new(None::<String>);
    let mode = RwSignal::new(None::<FormMode<UserId>>);
    let form = RwSignal::new(UserForm::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let load = move || {
        leptos::task::spawn_local(async move {
            match shop_client().list_users().await {
                Ok(found) => {
                    users.set(found);
                    error.set(None);
                }
                Err(err) => error.set(Some(err.message_or(LOAD_USERS_FALLBACK))),
            }
        });
    };
    Effect::new(load);

    let visible = Memo::new(move |_| {
        let q = query.get();
        users.with(|all| filter_users(all, &q).into_iter().cloned().collect::<Vec<_>>())
    });

    let open_editor = move |next: FormMode<UserId>, initial: UserForm| {
        mode.set(Some(next));
        form.set(initial);
        form_error.set(None);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = mode.get_untracked() else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let draft = form.get_untracked();
        leptos::task::spawn_local(async move {
            match save_user(&shop_client(), current, &draft, &notifier).await {
                Ok(()) => {
                    mode.set(None);
                    load();
                }
                Err(ApiError::Validation(message)) => form_error.set(Some(message)),
                Err(err) => notifier.error(&err.message_or(SAVE_FALLBACK_MESSAGE)),
            }
            busy.set(false);
        });
    };

    let on_delete = move |target: User| {
        let current_user_id = session.with_untracked(|s| s.user.as_ref().map(|u| u.id));
        leptos::task::spawn_local(async move {
            if let Ok(DeleteOutcome::Deleted) = delete_user(&shop_client(), &target, current_user_id, &notifier).await {
                load();
            }
        });
    };

    view! {
        <section class="admin-page">
            <header class="admin-page__header">
                <h2>"Users"</h2>
                <button class="btn btn--primary" on:click=move |_| open_editor(FormMode::Create, UserForm::default())>
                    "New user"
                </button>
            </header>
            <input
                class="search-bar"
                type="search"
                placeholder="Search users"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <ErrorAlert message=error/>

            <Show when=move || mode.get().is_some()>
                <form class="editor" on:submit=on_save>
                    <h3>
                        {move || match mode.get() {
                            Some(FormMode::Edit(id)) => format!("Edit user #{id}"),
                            _ => "New user".to_owned(),
                        }}
                    </h3>
                    <ErrorAlert message=form_error/>
                    <input
                        type="text"
                        placeholder="First name"
                        prop:value=move || form.with(|f| f.first_name.clone())
                        on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Last name"
                        prop:value=move || form.with(|f| f.last_name.clone())
                        on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <select
                        prop:value=move || form.with(|f| f.role.as_str().to_owned())
                        on:change=move |ev| form.update(|f| f.role = role_from_choice(&event_target_value(&ev)))
                    >
                        {ROLE_CHOICES
                            .iter()
                            .map(|role| {
                                let value = role.as_str().to_owned();
                                view! { <option value=value.clone()>{value.clone()}</option> }
                            })
                            .collect_view()}
                    </select>
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || form.with(|f| f.password_confirmation.clone())
                        on:input=move |ev| form.update(|f| f.password_confirmation = event_target_value(&ev))
                    />
                    <div class="editor__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Save"
                        </button>
                        <button class="btn" type="button" on:click=move |_| mode.set(None)>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>

            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=|user| (user.id, user.email.clone(), name_cell(user), user.role.as_str().to_owned())
                        children=move |user| {
                            let edit = user.clone();
                            let remove = user.clone();
                            view! {
                                <tr>
                                    <td>{name_cell(&user)}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>{user.role.as_str().to_owned()}</td>
                                    <td class="admin-table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| open_editor(FormMode::Edit(edit.id), UserForm::from_user(&edit))
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--small btn--danger"
                                            on:click=move |_| on_delete(remove.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
