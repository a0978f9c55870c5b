use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{send_to_whatsapp, FilterBar};
use crate::app::{use_app, use_cart, use_toaster, Page};
use crate::catalog::{self, categories_of, filter_listings, Product, ALL_CATEGORIES};
use crate::checkout;
use crate::components::product_card::ProductCard;
use crate::components::{loading_row, page_shell};

#[function_component(ShopPage)]
pub fn shop_page() -> Html {
    let app = use_app();
    let cart = use_cart();
    let toaster = use_toaster();
    let products = use_state(Vec::<Product>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let category = use_state(|| ALL_CATEGORIES.to_string());

    {
        let products = products.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_products(&client).await {
                        Ok(list) => {
                            tracing::debug!(count = list.len(), "products loaded");
                            products.set(list);
                        }
                        Err(err) => toaster.error("Could not load products", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };
    let on_select = {
        let category = category.clone();
        Callback::from(move |value: String| category.set(value))
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

    let visible = filter_listings(&products, &search, &category);

    html! {
        { page_shell(
            "Shop",
            html! {
                <span class="text-sm text-muted-foreground">{ format!("{} products", visible.len()) }</span>
            },
            html! {
                <>
                    <FilterBar
                        search={(*search).clone()}
                        categories={categories_of(&products)}
                        selected={(*category).clone()}
                        on_search={on_search}
                        on_select={on_select}
                    />
                    { if *loading {
                        loading_row("Loading products...")
                    } else if visible.is_empty() {
                        loading_row("No products match your search.")
                    } else {
                        html! {
                            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                                { for visible.iter().map(|product| html! {
                                    <ProductCard
                                        key={product.id.clone()}
                                        product={(*product).clone()}
                                        on_add={on_add.clone()}
                                        on_buy={on_buy.clone()}
                                        on_view={on_view.clone()}
                                    />
                                }) }
                            </div>
                        }
                    }}
                </>
            }
        ) }
    }
}
