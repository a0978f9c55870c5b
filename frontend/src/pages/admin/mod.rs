mod affiliates;
mod analytics;
mod orders;
mod products;
mod users;

use yew::prelude::*;

use crate::components::icons::{
    icon_bar_chart, icon_edit, icon_message, icon_package, icon_plus, icon_store, icon_trash, icon_users,
    icon_x,
};
use crate::components::{page_shell, tab_bar, DANGER_BUTTON, PRIMARY_BUTTON, SECONDARY_BUTTON};

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Analytics,
    Users,
    Products,
    Blog,
    Orders,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Analytics, Tab::Users, Tab::Products, Tab::Blog, Tab::Orders];

    fn label(&self) -> &'static str {
        match self {
            Tab::Analytics => "Analytics",
            Tab::Users => "Users",
            Tab::Products => "Products",
            Tab::Blog => "Blog products",
            Tab::Orders => "Orders",
        }
    }

    fn icon(&self) -> Html {
        match self {
            Tab::Analytics => icon_bar_chart(),
            Tab::Users => icon_users(),
            Tab::Products => icon_store(),
            Tab::Blog => icon_message(),
            Tab::Orders => icon_package(),
        }
    }
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let tab = use_state(|| Tab::Analytics);

    let content = match *tab {
        Tab::Analytics => html! { <analytics::AnalyticsTab /> },
        Tab::Users => html! { <users::UsersTab /> },
        Tab::Products => html! { <products::ProductsTab /> },
        Tab::Blog => html! { <affiliates::AffiliatesTab /> },
        Tab::Orders => html! { <orders::OrdersTab /> },
    };

    html! {
        { page_shell(
            "Admin",
            html! {},
            html! {
                <>
                    { tab_bar(&Tab::ALL, &tab, Tab::label, Tab::icon) }
                    { content }
                </>
            }
        ) }
    }
}

/// Which record the side form is editing.
#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(String),
}

impl Editing {
    fn id(&self) -> Option<&str> {
        match self {
            Editing::New => None,
            Editing::Existing(id) => Some(id),
        }
    }

    fn title(&self, noun: &str) -> String {
        match self {
            Editing::New => format!("New {}", noun),
            Editing::Existing(_) => format!("Edit {}", noun),
        }
    }
}

/// Form panel with a title, a close button and save / cancel actions.
fn form_panel(
    title: String,
    saving: bool,
    on_save: Callback<MouseEvent>,
    on_close: Callback<MouseEvent>,
    fields: Html,
) -> Html {
    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border space-y-4">
            <div class="flex items-center justify-between">
                <h3 class="font-bold text-foreground text-lg">{ title }</h3>
                <button type="button" class="p-2 rounded-lg hover:bg-secondary" aria-label="Close" onclick={on_close.clone()}>
                    { icon_x() }
                </button>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                { fields }
            </div>
            <div class="flex justify-end gap-2">
                <button type="button" class={SECONDARY_BUTTON} onclick={on_close}>{"Cancel"}</button>
                <button type="button" class={PRIMARY_BUTTON} disabled={saving} onclick={on_save}>
                    { if saving { "Saving..." } else { "Save" } }
                </button>
            </div>
        </div>
    }
}

/// Title row above a management table, with the "new" button.
fn section_header(title: &'static str, on_new: Callback<MouseEvent>) -> Html {
    html! {
        <div class="flex items-center justify-between">
            <h2 class="text-lg font-bold text-foreground">{ title }</h2>
            <button type="button" class={PRIMARY_BUTTON} onclick={on_new}>
                { icon_plus() }{"New"}
            </button>
        </div>
    }
}

/// Edit and delete buttons for one table row.
fn row_actions(on_edit: Callback<MouseEvent>, on_delete: Callback<MouseEvent>) -> Html {
    html! {
        <div class="flex justify-end gap-1">
            <button type="button" class="p-2 rounded-lg hover:bg-secondary" aria-label="Edit" onclick={on_edit}>
                { icon_edit() }
            </button>
            <button type="button" class={DANGER_BUTTON} aria-label="Delete" onclick={on_delete}>
                { icon_trash() }
            </button>
        </div>
    }
}

/// Labelled form field wrapper.
fn field(label: &'static str, input: Html) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            { input }
        </div>
    }
}
