//! `/catalog`: product search and add-to-cart.

use leptos::prelude::*;
use shop::Notifier;
use shop::money::format_price;
use shop::types::Item;

use crate::components::error_alert::ErrorAlert;
use crate::components::require_session::RequireSession;
use crate::net::api::shop_client;
use crate::state::cart::BrowserCart;
use crate::state::ui::UiNotifier;

pub const ADDED_TO_CART_MESSAGE: &str = "Added to cart";
pub const LOAD_ITEMS_FALLBACK: &str = "Failed to load items";

#[component]
pub fn CatalogPage() -> impl IntoView {
    view! {
        <RequireSession>
            <Catalog/>
        </RequireSession>
    }
}

#[component]
fn Catalog() -> impl IntoView {
    let cart = expect_context::<RwSignal<BrowserCart>>();
    let notifier = UiNotifier::from_context();

    let query = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<Item>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        let q = query.get_untracked();
        loading.set(true);
        leptos::task::spawn_local(async move {
            match shop_client().list_items(&q).await {
                Ok(found) => {
                    items.set(found);
                    error.set(None);
                }
                Err(err) => error.set(Some(err.message_or(LOAD_ITEMS_FALLBACK))),
            }
            loading.set(false);
        });
    };

    Effect::new(load);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load();
    };

    view! {
        <section class="catalog-page">
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
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading…"</p> }>
                <Show
                    when=move || items.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="page-status">"No items found"</p> }
                >
                    <div class="catalog-grid">
                        <For
                            each=move || items.get()
                            key=|item| item.id
                            children=move |item| {
                                let name = item.name.clone();
                                let description = item.description.clone().unwrap_or_default();
                                let price = format_price(item.price);
                                view! {
                                    <article class="item-card">
                                        <h3 class="item-card__name">{name}</h3>
                                        <p class="item-card__description">{description}</p>
                                        <p class="item-card__price">{price}</p>
                                        <button
                                            class="btn btn--primary"
                                            on:click=move |_| {
                                                cart.update(|c| c.add(&item, 1));
                                                notifier.success(ADDED_TO_CART_MESSAGE);
                                            }
                                        >
                                            "Add to cart"
                                        </button>
                                    </article>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
