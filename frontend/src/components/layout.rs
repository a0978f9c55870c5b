use yew::prelude::*;

use super::icons::{icon_bar_chart, icon_cart, icon_log_out, icon_message, icon_store, icon_user};
use crate::app::{use_app, use_cart, Page};
use crate::auth::Role;
use crate::checkout::whatsapp_url;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex flex-col bg-background">
            <Header />
            <main class="flex-1">
                { for props.children.iter() }
            </main>
            <Footer />
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
}

#[function_component(Header)]
fn header() -> Html {
    let app = use_app();
    let cart = use_cart();
    let show_menu = use_state(|| false);

    let nav_items = [
        NavItem { label: "Home", page: Page::Home },
        NavItem { label: "Shop", page: Page::Shop },
        NavItem { label: "Blog", page: Page::Blog },
    ];

    let go = |page: Page| {
        let navigate = app.navigate.clone();
        let show_menu = show_menu.clone();
        Callback::from(move |_| {
            show_menu.set(false);
            navigate.emit(page.clone());
        })
    };

    let toggle_menu = {
        let show_menu = show_menu.clone();
        Callback::from(move |_| show_menu.set(!*show_menu))
    };

    let on_logout = {
        let sign_out = app.sign_out.clone();
        let show_menu = show_menu.clone();
        Callback::from(move |_| {
            show_menu.set(false);
            sign_out.emit(());
        })
    };

    let item_count = cart.total_item_count();

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <button type="button" class="flex items-center gap-2 text-[#173E63]" onclick={go(Page::Home)}>
                { icon_store() }
                <span class="text-xl font-black tracking-tight">{ app.config.store_name.clone() }</span>
            </button>

            <nav class="hidden md:flex items-center gap-2">
                { for nav_items.iter().map(|item| {
                    let class_name = if item.page == app.page {
                        "px-4 py-2 rounded-xl text-[13px] font-medium bg-[#173E63] text-white"
                    } else {
                        "px-4 py-2 rounded-xl text-[13px] font-medium text-[#173E63] hover:bg-white/50"
                    };
                    html! {
                        <button type="button" class={class_name} onclick={go(item.page.clone())}>{ item.label }</button>
                    }
                }) }
            </nav>

            <div class="relative flex items-center gap-4">
                <button type="button" class="p-2 hover:bg-secondary rounded-full transition-colors relative text-[#173E63]" aria-label="Cart" onclick={go(Page::Cart)}>
                    { icon_cart() }
                    if item_count > 0 {
                        <span class="absolute -top-1 -right-1 min-w-[18px] h-[18px] px-1 bg-red-500 text-white text-[10px] font-bold rounded-full flex items-center justify-center">
                            { item_count }
                        </span>
                    }
                </button>
                {
                    match &app.session {
                        Some(user) => {
                            let dashboard = match user.role {
                                Role::Admin => ("Admin dashboard", Page::Admin),
                                Role::Customer => ("My account", Page::Dashboard),
                            };
                            html! {
                                <>
                                    <button type="button" class="flex items-center gap-2 text-sm font-medium text-[#173E63]" onclick={toggle_menu}>
                                        { icon_user() }
                                        <span>{ user.first_name().to_string() }</span>
                                    </button>
                                    if *show_menu {
                                        <div class="absolute right-0 top-12 w-56 bg-white border border-border rounded-xl shadow-lg overflow-hidden z-50">
                                            <div class="px-4 py-3 border-b border-border">
                                                <p class="text-sm font-bold text-[#173E63]">{ user.name.clone() }</p>
                                                <p class="text-xs text-slate-500">{ user.email.clone() }</p>
                                            </div>
                                            <button type="button" class="w-full flex items-center gap-2 px-4 py-3 text-sm hover:bg-slate-50" onclick={go(dashboard.1)}>
                                                { icon_bar_chart() }{ dashboard.0 }
                                            </button>
                                            <button type="button" class="w-full flex items-center gap-2 px-4 py-3 text-sm text-red-600 hover:bg-slate-50" onclick={on_logout}>
                                                { icon_log_out() }{"Log Out"}
                                            </button>
                                        </div>
                                    }
                                </>
                            }
                        }
                        None => html! {
                            <button type="button" class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm" onclick={go(Page::Login)}>
                                {"Sign in"}
                            </button>
                        },
                    }
                }
            </div>
        </header>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let app = use_app();
    let catalog_url = whatsapp_url(&app.config.whatsapp_phone, "", true);
    html! {
        <footer class="bg-[#173E63] text-slate-300 text-sm px-6 py-8 mt-12">
            <div class="max-w-7xl mx-auto flex flex-col md:flex-row justify-between gap-4">
                <div>
                    <p class="text-white font-bold text-lg">{ app.config.store_name.clone() }</p>
                    <p class="mt-1">{"Electronics, accessories and IPTV plans."}</p>
                </div>
                <div>
                    <p class="text-white font-bold">{"Contact"}</p>
                    <p class="mt-1">{ format!("WhatsApp: +{}", app.config.whatsapp_phone) }</p>
                    <a href={catalog_url} target="_blank" rel="noopener noreferrer" class="mt-1 flex items-center gap-1 text-white hover:underline">
                        { icon_message() }{"Browse our WhatsApp catalog"}
                    </a>
                </div>
            </div>
        </footer>
    }
}
