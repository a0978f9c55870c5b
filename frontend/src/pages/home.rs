use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::send_to_whatsapp;
use crate::app::{use_app, use_cart, use_toaster, Page};
use crate::catalog::{self, Product};
use crate::checkout;
use crate::components::icons::{icon_message, icon_package, icon_tv};
use crate::components::product_card::ProductCard;

const FEATURED: usize = 4;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let app = use_app();
    let cart = use_cart();
    let toaster = use_toaster();
    let featured = use_state(Vec::<Product>::new);
    let loading = use_state(|| true);

    {
        let featured = featured.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_products(&client).await {
                        Ok(list) => featured.set(list.into_iter().take(FEATURED).collect()),
                        Err(err) => toaster.error("Could not load products", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let go = |page: Page| {
        let navigate = app.navigate.clone();
        Callback::from(move |_| navigate.emit(page.clone()))
    };

    let on_add = {
        let cart = cart.clone();
        let toaster = toaster.clone();
        Callback::from(move |product: Product| {
            cart.add_item(&product, 1);
            toaster.success("Added to cart", Some(product.name));
        })
    };
    let on_buy = {
        let config = app.config.clone();
        Callback::from(move |product: Product| {
            send_to_whatsapp(&config, &checkout::buy_now_message(&product));
        })
    };
    let on_view = {
        let navigate = app.navigate.clone();
        Callback::from(move |id: String| navigate.emit(Page::Product(id)))
    };

    html! {
        <>
            <section class="bg-[#173E63] text-white">
                <div class="max-w-7xl mx-auto px-6 py-16 grid md:grid-cols-2 gap-8 items-center">
                    <div>
                        <h1 class="text-4xl font-black tracking-tight">{ format!("Welcome to {}", app.config.store_name) }</h1>
                        <p class="mt-4 text-slate-300">{"The latest electronics at fair prices, plus IPTV plans that fit your month."}</p>
                        <div class="mt-6 flex gap-3">
                            <button type="button" class="bg-white text-[#173E63] px-5 py-3 rounded-xl font-bold" onclick={go(Page::Shop)}>{"Shop now"}</button>
                            <button type="button" class="border border-white/40 px-5 py-3 rounded-xl font-bold" onclick={go(Page::Blog)}>{"Recommendations"}</button>
                        </div>
                    </div>
                    <div class="grid grid-cols-3 gap-4 text-center">
                        <div class="bg-white/10 rounded-2xl p-4">{ icon_package() }<p class="mt-2 text-sm">{"Fast delivery"}</p></div>
                        <div class="bg-white/10 rounded-2xl p-4">{ icon_tv() }<p class="mt-2 text-sm">{"IPTV plans"}</p></div>
                        <div class="bg-white/10 rounded-2xl p-4">{ icon_message() }<p class="mt-2 text-sm">{"WhatsApp support"}</p></div>
                    </div>
                </div>
            </section>

            <section class="max-w-7xl mx-auto px-6 py-10">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-2xl font-bold text-foreground">{"Featured products"}</h2>
                    <button type="button" class="text-primary font-semibold text-sm" onclick={go(Page::Shop)}>{"See all"}</button>
                </div>
                { if *loading {
                    html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                } else if featured.is_empty() {
                    html! { <p class="text-sm text-muted-foreground">{"No products yet."}</p> }
                } else {
                    html! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                            { for featured.iter().map(|product| html! {
                                <ProductCard
                                    key={product.id.clone()}
                                    product={product.clone()}
                                    on_add={on_add.clone()}
                                    on_buy={on_buy.clone()}
                                    on_view={on_view.clone()}
                                />
                            }) }
                        </div>
                    }
                }}
            </section>
        </>
    }
}
