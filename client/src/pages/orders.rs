//! `/orders`: the signed-in user's order history with expandable lines.

#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use leptos::prelude::*;
use shop::money::format_price;
use shop::types::{Order, OrderId, OrderLine};

use crate::components::error_alert::ErrorAlert;
use crate::components::require_session::RequireSession;
use crate::net::api::shop_client;

pub const NO_ORDERS_MESSAGE: &str = "You have no orders yet";
pub const LOAD_ORDERS_FALLBACK: &str = "Failed to load orders";

/// Summary row text: `Order #12 · $30.00`.
pub fn order_heading(order: &Order) -> String {
    format!("Order #{} · {}", order.id, format_price(order.amount))
}

/// `Lamp × 2 · $20.00`, or `Item #5 × 2` when the item was not embedded.
pub fn order_line_text(line: &OrderLine) -> String {
    match &line.item {
        Some(item) => format!("{} × {} · {}", item.name, line.quantity, format_price(line.line_total())),
        None => format!("Item #{} × {}", line.id, line.quantity),
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    view! {
        <RequireSession>
            <Orders/>
        </RequireSession>
    }
}

#[component]
fn Orders() -> impl IntoView {
    let orders = RwSignal::new(Vec::<Order>::new());
    let expanded = RwSignal::new(None::<OrderId>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        leptos::task::spawn_local(async move {
            match shop_client().list_orders().await {
                Ok(found) => orders.set(found),
                Err(err) => error.set(Some(err.message_or(LOAD_ORDERS_FALLBACK))),
            }
            loading.set(false);
        });
    });

    let toggle = move |id: OrderId| {
        expanded.update(|open| *open = if *open == Some(id) { None } else { Some(id) });
    };

    view! {
        <section class="orders-page">
            <h2>"Orders"</h2>
            <ErrorAlert message=error/>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading…"</p> }>
                <Show
                    when=move || orders.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="page-status">{NO_ORDERS_MESSAGE}</p> }
                >
                    <ul class="order-list">
                        <For
                            each=move || orders.get()
                            key=|order| order.id
                            children=move |order| {
                                let id = order.id;
                                let heading = order_heading(&order);
                                let placed = order.created_at.clone().unwrap_or_default();
                                let lines: Vec<String> = order.lines.iter().map(order_line_text).collect();
                                view! {
                                    <li class="order-list__order">
                                        <button class="order-list__toggle" on:click=move |_| toggle(id)>
                                            <span>{heading}</span>
                                            <span class="order-list__date">{placed}</span>
                                        </button>
                                        <Show when=move || expanded.get() == Some(id)>
                                            <ul class="order-list__lines">
                                                {lines.iter().map(|text| view! { <li>{text.clone()}</li> }).collect_view()}
                                            </ul>
                                        </Show>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}
