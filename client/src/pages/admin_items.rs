//! `/admin/items`: item list with search, inline editor, and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin-only. Form rules (required name, non-negative price) are checked by
//! `shop::admin` before any request; their message is shown inline. Request
//! failures surface as error toasts. The list reloads after every change.

use leptos::prelude::*;
use shop::admin::{DeleteOutcome, FormMode, ItemForm, SAVE_FALLBACK_MESSAGE, delete_item, save_item};
use shop::money::format_price;
use shop::types::{Item, ItemId};
use shop::{ApiError, Notifier};

use crate::components::error_alert::ErrorAlert;
use crate::components::require_session::RequireSession;
use crate::net::api::shop_client;
use crate::pages::catalog::LOAD_ITEMS_FALLBACK;
use crate::state::ui::UiNotifier;

#[component]
pub fn AdminItemsPage() -> impl IntoView {
    view! {
        <RequireSession admin=true>
            <AdminItems/>
        </RequireSession>
    }
}

#[component]
fn AdminItems() -> impl IntoView {
    let notifier = UiNotifier::from_context();

    let query = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<Item>::new());
    let error = RwSignal::new(None::<String>);
    let mode = RwSignal::new(None::<FormMode<ItemId>>);
    let form = RwSignal::new(ItemForm::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let load = move || {
        let q = query.get_untracked();
        leptos::task::spawn_local(async move {
            match shop_client().list_items(&q).await {
                Ok(found) => {
                    items.set(found);
                    error.set(None);
                }
                Err(err) => error.set(Some(err.message_or(LOAD_ITEMS_FALLBACK))),
            }
        });
    };
    Effect::new(load);

    let open_editor = move |next: FormMode<ItemId>, initial: ItemForm| {
        mode.set(Some(next));
        form.set(initial);
        form_error.set(None);
    };

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load();
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
            match save_item(&shop_client(), current, &draft, &notifier).await {
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

    let on_delete = move |item: Item| {
        leptos::task::spawn_local(async move {
            if let Ok(DeleteOutcome::Deleted) = delete_item(&shop_client(), &item, &notifier).await {
                load();
            }
        });
    };

    view! {
        <section class="admin-page">
            <header class="admin-page__header">
                <h2>"Items"</h2>
                <button class="btn btn--primary" on:click=move |_| open_editor(FormMode::Create, ItemForm::default())>
                    "New item"
                </button>
            </header>
            <form class="search-bar" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search items"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Search"</button>
            </form>
            <ErrorAlert message=error/>

            <Show when=move || mode.get().is_some()>
                <form class="editor" on:submit=on_save>
                    <h3>
                        {move || match mode.get() {
                            Some(FormMode::Edit(id)) => format!("Edit item #{id}"),
                            _ => "New item".to_owned(),
                        }}
                    </h3>
                    <ErrorAlert message=form_error/>
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="0.00"
                        prop:value=move || form.with(|f| f.price.clone())
                        on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
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
                        <th>"Price"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|item| (item.id, item.name.clone(), item.price)
                        children=move |item| {
                            let edit = item.clone();
                            let remove = item.clone();
                            view! {
                                <tr>
                                    <td>{item.name.clone()}</td>
                                    <td>{format_price(item.price)}</td>
                                    <td class="admin-table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| open_editor(FormMode::Edit(edit.id), ItemForm::from_item(&edit))
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
