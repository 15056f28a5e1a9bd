//! `/cart`: line editing, running total, and checkout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every edit goes through the shop `Cart`, which persists to
//! `localStorage` on each mutation. Checkout works on a copy of the cart and
//! only publishes it (cleared) once the order was accepted, so a failed
//! checkout leaves the cart exactly as it was.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use shop::Notifier;
use shop::cart::parse_quantity;
use shop::checkout::{checkout, checkout_error_message};
use shop::money::format_price;

use crate::components::require_session::RequireSession;
use crate::net::api::shop_client;
use crate::state::cart::BrowserCart;
use crate::state::ui::UiNotifier;
use crate::util::auth::CATALOG_PATH;

#[component]
pub fn CartPage() -> impl IntoView {
    view! {
        <RequireSession>
            <CartView/>
        </RequireSession>
    }
}

#[component]
fn CartView() -> impl IntoView {
    let cart = expect_context::<RwSignal<BrowserCart>>();
    let notifier = UiNotifier::from_context();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let on_checkout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let mut working = cart.get_untracked();
            match checkout(&shop_client(), &mut working, &notifier).await {
                Ok(_) => {
                    cart.set(working);
                    navigate(CATALOG_PATH, NavigateOptions::default());
                }
                Err(err) => notifier.error(&checkout_error_message(&err)),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="cart-page">
            <h2>"Cart"</h2>
            <Show
                when=move || cart.with(|c| !c.is_empty())
                fallback=|| view! { <p class="page-status">"Your cart is empty"</p> }
            >
                <table class="cart-table">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Price"</th>
                            <th>"Quantity"</th>
                            <th>"Subtotal"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || cart.with(|c| c.lines().to_vec())
                            key=|line| (line.product_id, line.quantity)
                            children=move |line| {
                                let id = line.product_id;
                                view! {
                                    <tr>
                                        <td>{line.name.clone()}</td>
                                        <td>{format_price(line.unit_price)}</td>
                                        <td class="cart-table__qty">
                                            <button class="btn btn--small" on:click=move |_| cart.update(|c| c.decrement(id))>
                                                "-"
                                            </button>
                                            <input
                                                type="number"
                                                min="1"
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| {
                                                    let quantity = parse_quantity(&event_target_value(&ev));
                                                    cart.update(|c| c.set_quantity(id, quantity));
                                                }
                                            />
                                            <button class="btn btn--small" on:click=move |_| cart.update(|c| c.increment(id))>
                                                "+"
                                            </button>
                                        </td>
                                        <td>{format_price(line.line_total())}</td>
                                        <td>
                                            <button class="btn btn--danger" on:click=move |_| cart.update(|c| c.remove(id))>
                                                "Remove"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <div class="cart-summary">
                    <span class="cart-summary__total">
                        "Total: " {move || format_price(cart.with(BrowserCart::total))}
                    </span>
                    <button class="btn btn--danger" on:click=move |_| cart.update(BrowserCart::clear)>
                        "Clear cart"
                    </button>
                    <button class="btn btn--primary" on:click=on_checkout.clone() disabled=move || busy.get()>
                        {move || if busy.get() { "Placing order…" } else { "Checkout" }}
                    </button>
                </div>
            </Show>
        </section>
    }
}
