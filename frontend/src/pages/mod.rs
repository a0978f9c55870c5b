pub mod admin;
pub mod blog;
pub mod cart;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod product;
pub mod shop;

use yew::prelude::*;

use crate::checkout;
use crate::components::open_in_new_tab;
use crate::config::AppConfig;

/// Search box plus category chips shared by the shop and the blog.
#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub search: String,
    pub categories: Vec<String>,
    pub selected: String,
    pub on_search: Callback<String>,
    pub on_select: Callback<String>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    html! {
        <div class="space-y-3">
            <div class="relative">
                <span class="absolute left-3 top-2.5 text-muted-foreground">{ crate::components::icons::icon_search() }</span>
                <input
                    type="search"
                    placeholder="Search products..."
                    class="w-full pl-10 pr-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                    value={props.search.clone()}
                    oninput={on_input}
                />
            </div>
            <div class="flex flex-wrap gap-2">
                { for props.categories.iter().map(|category| {
                    let class_name = if *category == props.selected {
                        "px-3 py-1 rounded-full text-xs font-bold bg-[#173E63] text-white"
                    } else {
                        "px-3 py-1 rounded-full text-xs font-bold bg-secondary text-secondary-foreground"
                    };
                    let on_select = props.on_select.clone();
                    let value = category.clone();
                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(value.clone()))}>
                            { category.clone() }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

/// Opens a WhatsApp chat with `message` pre-filled.
pub fn send_to_whatsapp(config: &AppConfig, message: &str) -> bool {
    let url = checkout::whatsapp_url(&config.whatsapp_phone, message, false);
    tracing::info!(chars = message.len(), "opening WhatsApp hand-off");
    open_in_new_tab(&url)
}
