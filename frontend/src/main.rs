mod admin;
mod analytics;
mod app;
mod auth;
mod backend;
mod cart;
mod catalog;
mod checkout;
mod components;
mod config;
mod error;
mod logging;
mod money;
mod orders;
mod pages;
mod storage;
mod subscriptions;
mod toast;
mod validation;

fn main() {
    logging::init();
    yew::Renderer::<app::App>::new().render();
}
