use yew::prelude::*;

use super::icons::{icon_cart, icon_external_link, icon_message};
use crate::catalog::{AffiliateProduct, Listing, Product};

#[derive(Properties, PartialEq)]
pub struct ProductCardProps {
    pub product: Product,
    pub on_add: Callback<Product>,
    pub on_buy: Callback<Product>,
    pub on_view: Callback<String>,
}

#[function_component(ProductCard)]
pub fn product_card(props: &ProductCardProps) -> Html {
    let product = &props.product;
    let on_view = {
        let on_view = props.on_view.clone();
        let id = product.id.clone();
        Callback::from(move |_| on_view.emit(id.clone()))
    };
    let on_add = {
        let on_add = props.on_add.clone();
        let product = product.clone();
        Callback::from(move |_| on_add.emit(product.clone()))
    };
    let on_buy = {
        let on_buy = props.on_buy.clone();
        let product = product.clone();
        Callback::from(move |_| on_buy.emit(product.clone()))
    };

    html! {
        <div class="bg-card rounded-[10px] border border-border overflow-hidden flex flex-col">
            <button type="button" class="aspect-square bg-muted overflow-hidden" onclick={on_view.clone()}>
                <img src={product.image().to_string()} alt={product.name.clone()} class="w-full h-full object-cover hover:scale-105 transition-transform" />
            </button>
            <div class="p-4 flex flex-col flex-1 gap-2">
                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold self-start">{ product.category_name().to_string() }</span>
                <button type="button" class="text-left font-bold text-foreground hover:underline" onclick={on_view}>{ product.name.clone() }</button>
                <p class="text-sm text-muted-foreground line-clamp-2">{ product.description.clone() }</p>
                <p class="text-xl font-bold text-[#1D617A] mt-auto">{ product.price.to_string() }</p>
                <div class="grid grid-cols-2 gap-2">
                    <button type="button" onclick={on_add} class="flex items-center justify-center gap-1 bg-secondary text-secondary-foreground px-3 py-2 rounded-xl text-sm font-bold">
                        { icon_cart() }{"Add"}
                    </button>
                    <button type="button" onclick={on_buy} class="flex items-center justify-center gap-1 bg-primary text-primary-foreground px-3 py-2 rounded-xl text-sm font-bold">
                        { icon_message() }{"Buy now"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AffiliateCardProps {
    pub item: AffiliateProduct,
    pub on_open: Callback<String>,
}

#[function_component(AffiliateCard)]
pub fn affiliate_card(props: &AffiliateCardProps) -> Html {
    let item = &props.item;
    let on_open = {
        let on_open = props.on_open.clone();
        let link = item.link.clone();
        Callback::from(move |_| on_open.emit(link.clone()))
    };

    html! {
        <div class="bg-card rounded-[10px] border border-border overflow-hidden flex flex-col">
            <div class="aspect-video bg-muted overflow-hidden">
                <img src={item.image().to_string()} alt={item.name.clone()} class="w-full h-full object-cover" />
            </div>
            <div class="p-4 flex flex-col flex-1 gap-2">
                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold self-start">{ item.category_name().to_string() }</span>
                <h3 class="font-bold text-foreground">{ item.name.clone() }</h3>
                <p class="text-sm text-muted-foreground line-clamp-3">{ item.description.clone() }</p>
                <p class="text-xl font-bold text-[#1D617A] mt-auto">{ item.price.to_string() }</p>
                <button type="button" onclick={on_open} class="flex items-center justify-center gap-2 bg-primary text-primary-foreground px-3 py-2 rounded-xl text-sm font-bold">
                    { icon_external_link() }{"Buy on partner site"}
                </button>
            </div>
        </div>
    }
}
