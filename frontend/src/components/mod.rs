pub mod cart_provider;
pub mod charts;
pub mod icons;
pub mod layout;
pub mod product_card;
pub mod stat_card;
pub mod toaster;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub fn page_shell(title: &str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn loading_row(message: &'static str) -> Html {
    html! { <p class="text-sm text-muted-foreground py-6 text-center">{ message }</p> }
}

/// Browser confirmation dialog; `false` when unavailable.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn open_in_new_tab(url: &str) -> bool {
    match web_sys::window() {
        Some(window) => match window.open_with_url_and_target(url, "_blank") {
            Ok(_) => true,
            Err(_) => {
                tracing::warn!(url, "could not open a new tab");
                false
            }
        },
        None => false,
    }
}

/// Row of tab buttons writing the chosen tab into `selected`.
pub fn tab_bar<T: Copy + PartialEq + 'static>(
    tabs: &[T],
    selected: &UseStateHandle<T>,
    label: fn(&T) -> &'static str,
    icon: fn(&T) -> Html,
) -> Html {
    let active = **selected;
    html! {
        <div class="flex flex-wrap gap-2 border-b border-border pb-3">
            { for tabs.iter().map(|tab| {
                let class_name = if *tab == active {
                    "flex items-center gap-2 px-4 py-2 rounded-xl text-[13px] font-medium bg-[#173E63] text-white"
                } else {
                    "flex items-center gap-2 px-4 py-2 rounded-xl text-[13px] font-medium text-[#173E63] hover:bg-secondary"
                };
                let selected = selected.clone();
                let value = *tab;
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| selected.set(value))}>
                        { icon(tab) }{ label(tab) }
                    </button>
                }
            }) }
        </div>
    }
}

pub fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value());
    })
}

/// `oninput` for one text field of a form struct held in state.
pub fn edit_field<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

pub fn edit_text_area<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, area.value());
        form.set(next);
    })
}

pub fn edit_select<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, select.value());
        form.set(next);
    })
}

pub const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
pub const PRIMARY_BUTTON: &str = "flex items-center justify-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all disabled:opacity-50";
pub const SECONDARY_BUTTON: &str = "flex items-center justify-center gap-2 bg-secondary text-secondary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all";
pub const DANGER_BUTTON: &str = "flex items-center justify-center gap-2 text-red-600 hover:bg-red-50 px-3 py-2 rounded-lg text-sm transition-colors";
