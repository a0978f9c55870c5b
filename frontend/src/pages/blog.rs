use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::FilterBar;
use crate::app::{use_app, use_toaster};
use crate::catalog::{self, categories_of, filter_listings, AffiliateProduct, ALL_CATEGORIES};
use crate::components::product_card::AffiliateCard;
use crate::components::{loading_row, open_in_new_tab, page_shell};

#[function_component(BlogPage)]
pub fn blog_page() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let items = use_state(Vec::<AffiliateProduct>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let category = use_state(|| ALL_CATEGORIES.to_string());

    {
        let items = items.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_affiliate_products(&client).await {
                        Ok(list) => items.set(list),
                        Err(err) => toaster.error("Could not load recommendations", &err.into()),
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
    let on_open = Callback::from(|link: String| {
        open_in_new_tab(&link);
    });

    let visible = filter_listings(&items, &search, &category);

    html! {
        { page_shell(
            "Recommendations",
            html! {},
            html! {
                <>
                    <p class="text-sm text-muted-foreground">{"Products we like, sold by our partners."}</p>
                    <FilterBar
                        search={(*search).clone()}
                        categories={categories_of(&items)}
                        selected={(*category).clone()}
                        on_search={on_search}
                        on_select={on_select}
                    />
                    { if *loading {
                        loading_row("Loading...")
                    } else if visible.is_empty() {
                        loading_row("Nothing here yet.")
                    } else {
                        html! {
                            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
                                { for visible.iter().map(|item| html! {
                                    <AffiliateCard key={item.id.clone()} item={(*item).clone()} on_open={on_open.clone()} />
                                }) }
                            </div>
                        }
                    }}
                </>
            }
        ) }
    }
}
