use yew::prelude::*;

use super::send_to_whatsapp;
use crate::app::{use_app, use_cart, use_toaster, Page};
use crate::catalog::PLACEHOLDER_IMAGE;
use crate::checkout;
use crate::components::icons::{icon_message, icon_minus, icon_plus, icon_trash};
use crate::components::{confirm, page_shell, DANGER_BUTTON, PRIMARY_BUTTON, SECONDARY_BUTTON};

#[function_component(CartPage)]
pub fn cart_page() -> Html {
    let app = use_app();
    let cart = use_cart();
    let toaster = use_toaster();

    let lines = cart.lines();
    let total = cart.total_price();

    let on_checkout = {
        let cart = cart.clone();
        let config = app.config.clone();
        let toaster = toaster.clone();
        Callback::from(move |_| {
            if cart.is_empty() {
                return;
            }
            let message = checkout::cart_message(&cart.lines(), cart.total_price());
            if send_to_whatsapp(&config, &message) {
                cart.clear();
                toaster.success("Order sent", Some("Finish your purchase on WhatsApp.".to_string()));
            }
        })
    };

    let on_clear = {
        let cart = cart.clone();
        Callback::from(move |_| {
            if confirm("Remove every item from the cart?") {
                cart.clear();
            }
        })
    };

    let continue_shopping = {
        let navigate = app.navigate.clone();
        Callback::from(move |_| navigate.emit(Page::Shop))
    };

    if lines.is_empty() {
        return page_shell(
            "Cart",
            html! {},
            html! {
                <div class="bg-card rounded-[10px] p-10 border border-border text-center space-y-4">
                    <p class="text-muted-foreground">{"Your cart is empty."}</p>
                    <button type="button" class={PRIMARY_BUTTON} onclick={continue_shopping}>{"Browse the shop"}</button>
                </div>
            },
        );
    }

    html! {
        { page_shell(
            "Cart",
            html! {
                <button type="button" class={DANGER_BUTTON} onclick={on_clear}>{ icon_trash() }{"Clear cart"}</button>
            },
            html! {
                <div class="grid lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2 bg-card rounded-[10px] border border-border divide-y divide-border">
                        { for lines.iter().map(|line| {
                            let id = line.product_id.clone();
                            let quantity = i64::from(line.quantity);
                            let less = {
                                let cart = cart.clone();
                                let id = id.clone();
                                Callback::from(move |_| cart.update_quantity(&id, quantity - 1))
                            };
                            let more = {
                                let cart = cart.clone();
                                let id = id.clone();
                                Callback::from(move |_| cart.update_quantity(&id, quantity + 1))
                            };
                            let remove = {
                                let cart = cart.clone();
                                Callback::from(move |_| cart.remove_item(&id))
                            };
                            let image = line.image_url.clone().filter(|u| !u.is_empty()).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
                            html! {
                                <div key={line.product_id.clone()} class="flex items-center gap-4 p-4">
                                    <img src={image} alt={line.name.clone()} class="w-20 h-20 rounded-lg object-cover bg-muted" />
                                    <div class="flex-1">
                                        <p class="font-bold text-foreground">{ line.name.clone() }</p>
                                        <p class="text-sm text-muted-foreground">{ line.unit_price.to_string() }</p>
                                    </div>
                                    <div class="flex items-center border border-border rounded-xl">
                                        <button type="button" class="p-2" aria-label="Less" onclick={less}>{ icon_minus() }</button>
                                        <span class="px-3 font-bold">{ line.quantity }</span>
                                        <button type="button" class="p-2" aria-label="More" onclick={more}>{ icon_plus() }</button>
                                    </div>
                                    <p class="w-28 text-right font-semibold">{ line.subtotal().to_string() }</p>
                                    <button type="button" class={DANGER_BUTTON} aria-label="Remove" onclick={remove}>{ icon_trash() }</button>
                                </div>
                            }
                        }) }
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border h-fit space-y-4">
                        <h3 class="font-bold text-foreground text-lg">{"Summary"}</h3>
                        <div class="flex justify-between text-sm text-muted-foreground">
                            <span>{ format!("Items ({})", cart.total_item_count()) }</span>
                            <span>{ total.to_string() }</span>
                        </div>
                        <div class="flex justify-between font-bold text-lg border-t border-border pt-4">
                            <span>{"Total"}</span>
                            <span class="text-[#1D617A]">{ total.to_string() }</span>
                        </div>
                        <button type="button" class={format!("{} w-full", PRIMARY_BUTTON)} onclick={on_checkout}>
                            { icon_message() }{"Checkout on WhatsApp"}
                        </button>
                        <button type="button" class={format!("{} w-full", SECONDARY_BUTTON)} onclick={continue_shopping}>
                            {"Continue shopping"}
                        </button>
                    </div>
                </div>
            }
        ) }
    }
}
