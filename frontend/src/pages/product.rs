use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::send_to_whatsapp;
use crate::app::{use_app, use_cart, use_toaster, Page};
use crate::catalog::{self, Listing, Product};
use crate::checkout;
use crate::components::icons::{icon_arrow_left, icon_cart, icon_message, icon_minus, icon_plus};
use crate::components::loading_row;
use crate::error::AppError;

#[derive(Properties, PartialEq)]
pub struct ProductPageProps {
    pub id: String,
}

#[function_component(ProductPage)]
pub fn product_page(props: &ProductPageProps) -> Html {
    let app = use_app();
    let cart = use_cart();
    let toaster = use_toaster();
    let product = use_state(|| None::<Product>);
    let quantity = use_state(|| 1u32);

    {
        let product = product.clone();
        let quantity = quantity.clone();
        let client = app.client.clone();
        let navigate = app.navigate.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |id: &String| {
                let id = id.clone();
                quantity.set(1);
                spawn_local(async move {
                    match catalog::load_product(&client, &id).await {
                        Ok(Some(found)) => product.set(Some(found)),
                        Ok(None) => {
                            toaster.error("Could not open product", &AppError::NotFound("Product"));
                            navigate.emit(Page::Shop);
                        }
                        Err(err) => {
                            toaster.error("Could not open product", &err.into());
                            navigate.emit(Page::Shop);
                        }
                    }
                });
                || ()
            },
            props.id.clone(),
        );
    }

    let back = {
        let navigate = app.navigate.clone();
        Callback::from(move |_| navigate.emit(Page::Shop))
    };

    let Some(item) = (*product).clone() else {
        return loading_row("Loading product...");
    };

    let in_cart = cart.quantity_of(&item.id);

    let decrement = {
        let quantity = quantity.clone();
        Callback::from(move |_| quantity.set((*quantity).saturating_sub(1).max(1)))
    };
    let increment = {
        let quantity = quantity.clone();
        Callback::from(move |_| quantity.set(*quantity + 1))
    };
    let on_add = {
        let cart = cart.clone();
        let toaster = toaster.clone();
        let quantity = quantity.clone();
        let item = item.clone();
        Callback::from(move |_| {
            cart.add_item(&item, *quantity);
            toaster.success("Added to cart", Some(format!("{} × {}", *quantity, item.name)));
        })
    };
    let on_buy = {
        let config = app.config.clone();
        let item = item.clone();
        Callback::from(move |_| {
            send_to_whatsapp(&config, &checkout::buy_now_message(&item));
        })
    };

    html! {
        <div class="p-6 max-w-6xl mx-auto space-y-6">
            <button type="button" class="flex items-center gap-2 text-sm text-muted-foreground hover:text-foreground" onclick={back}>
                { icon_arrow_left() }{"Back to shop"}
            </button>
            <div class="grid md:grid-cols-2 gap-10">
                <div class="bg-muted rounded-2xl overflow-hidden aspect-square">
                    <img src={item.image().to_string()} alt={item.name.clone()} class="w-full h-full object-cover" />
                </div>
                <div class="space-y-4">
                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ item.category_name().to_string() }</span>
                    <h1 class="text-3xl font-bold text-foreground">{ item.name.clone() }</h1>
                    <p class="text-3xl font-black text-[#1D617A]">{ item.price.to_string() }</p>
                    <p class="text-muted-foreground whitespace-pre-line">{ item.description.clone() }</p>

                    <div class="flex items-center gap-3">
                        <span class="text-sm font-medium">{"Quantity"}</span>
                        <div class="flex items-center border border-border rounded-xl">
                            <button type="button" class="p-2" aria-label="Less" onclick={decrement}>{ icon_minus() }</button>
                            <span class="px-4 font-bold">{ *quantity }</span>
                            <button type="button" class="p-2" aria-label="More" onclick={increment}>{ icon_plus() }</button>
                        </div>
                    </div>

                    if in_cart > 0 {
                        <p class="text-sm text-muted-foreground">{ format!("{} already in your cart", in_cart) }</p>
                    }

                    <div class="grid grid-cols-2 gap-3">
                        <button type="button" onclick={on_add} class="flex items-center justify-center gap-2 bg-secondary text-secondary-foreground px-4 py-3 rounded-xl font-bold">
                            { icon_cart() }{"Add to cart"}
                        </button>
                        <button type="button" onclick={on_buy} class="flex items-center justify-center gap-2 bg-primary text-primary-foreground px-4 py-3 rounded-xl font-bold">
                            { icon_message() }{"Buy on WhatsApp"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
