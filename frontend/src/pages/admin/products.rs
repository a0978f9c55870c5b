use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{field, form_panel, row_actions, section_header, Editing};
use crate::admin::{self, ProductForm};
use crate::app::{use_app, use_toaster};
use crate::catalog::{self, Category, Listing, Product};
use crate::components::{
    bind_input, confirm, edit_field, edit_select, edit_text_area, loading_row, INPUT_CLASS,
};

#[function_component(ProductsTab)]
pub fn products_tab() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let products = use_state(Vec::<Product>::new);
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let editing = use_state(|| None::<Editing>);
    let form = use_state(ProductForm::default);
    // Upload results land here and are merged into the form on save.
    let image_url = use_state(String::new);
    let uploading = use_state(|| false);
    let saving = use_state(|| false);

    {
        let products = products.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match admin::list_products(&client).await {
                        Ok(rows) => products.set(rows),
                        Err(err) => toaster.error("Could not load products", &err),
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    {
        let categories = categories.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_categories(&client).await {
                        Ok(rows) => categories.set(rows),
                        Err(err) => toaster.error("Could not load categories", &err.into()),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_new = {
        let editing = editing.clone();
        let form = form.clone();
        let image_url = image_url.clone();
        Callback::from(move |_| {
            form.set(ProductForm::default());
            image_url.set(String::new());
            editing.set(Some(Editing::New));
        })
    };

    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let on_file = {
        let image_url = image_url.clone();
        let uploading = uploading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let image_url = image_url.clone();
            let uploading = uploading.clone();
            let client = client.clone();
            let toaster = toaster.clone();
            uploading.set(true);
            spawn_local(async move {
                match admin::upload_product_image(&client, &file).await {
                    Ok(url) => {
                        image_url.set(url);
                        toaster.info("Image uploaded", None);
                    }
                    Err(err) => toaster.error("Could not upload the image", &err),
                }
                uploading.set(false);
            });
        })
    };

    let on_save = {
        let editing = editing.clone();
        let form = form.clone();
        let image_url = image_url.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        Callback::from(move |_| {
            let Some(target) = (*editing).clone() else {
                return;
            };
            let submitted = ProductForm {
                image_url: (*image_url).clone(),
                ..(*form).clone()
            };
            let editing = editing.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            let client = client.clone();
            let toaster = toaster.clone();
            saving.set(true);
            spawn_local(async move {
                match admin::save_product(&client, target.id(), submitted).await {
                    Ok(()) => {
                        toaster.success("Product saved", None);
                        editing.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(err) => toaster.error("Could not save the product", &err),
                }
                saving.set(false);
            });
        })
    };

    let editor = match &*editing {
        Some(target) => form_panel(
            target.title("product"),
            *saving || *uploading,
            on_save,
            on_close,
            html! {
                <>
                    { field("Name", html! {
                        <input class={INPUT_CLASS} value={form.name.clone()} oninput={edit_field(&form, |f, v| f.name = v)} />
                    }) }
                    { field("Price", html! {
                        <input class={INPUT_CLASS} inputmode="decimal" placeholder="0,00" value={form.price.clone()} oninput={edit_field(&form, |f, v| f.price = v)} />
                    }) }
                    { field("Category", html! {
                        <select class={INPUT_CLASS} onchange={edit_select(&form, |f, v| f.category_id = v)}>
                            <option value="" selected={form.category_id.is_empty()}>{"No category"}</option>
                            { for categories.iter().map(|category| html! {
                                <option value={category.id.clone()} selected={form.category_id == category.id}>{ category.name.clone() }</option>
                            }) }
                        </select>
                    }) }
                    { field("Image URL", html! {
                        <input class={INPUT_CLASS} value={(*image_url).clone()} oninput={bind_input(&image_url)} />
                    }) }
                    { field("Upload image", html! {
                        <div class="flex items-center gap-3">
                            <input type="file" accept="image/*" class="text-sm" onchange={on_file} />
                            if *uploading {
                                <span class="text-xs text-muted-foreground">{"Uploading..."}</span>
                            }
                        </div>
                    }) }
                    if !image_url.is_empty() {
                        <img src={(*image_url).clone()} alt="Preview" class="w-24 h-24 rounded-lg object-cover bg-muted" />
                    }
                    <div class="md:col-span-2">
                        { field("Description", html! {
                            <textarea class={INPUT_CLASS} rows="4" value={form.description.clone()} oninput={edit_text_area(&form, |f, v| f.description = v)} />
                        }) }
                    </div>
                </>
            },
        ),
        None => html! {},
    };

    html! {
        <div class="space-y-4">
            { section_header("Products", on_new) }
            { editor }
            if *loading {
                { loading_row("Loading products...") }
            } else {
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-6 py-4 font-bold">{"Product"}</th>
                                <th class="px-6 py-4 font-bold">{"Category"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Price"}</th>
                                <th class="px-6 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { for products.iter().map(|product| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let form = form.clone();
                                    let image_url = image_url.clone();
                                    let product = product.clone();
                                    Callback::from(move |_| {
                                        let loaded = ProductForm::from_product(&product);
                                        image_url.set(loaded.image_url.clone());
                                        form.set(loaded);
                                        editing.set(Some(Editing::Existing(product.id.clone())));
                                    })
                                };
                                let on_delete = {
                                    let client = app.client.clone();
                                    let toaster = toaster.clone();
                                    let reload = reload.clone();
                                    let id = product.id.clone();
                                    let name = product.name.clone();
                                    Callback::from(move |_| {
                                        if !confirm(&format!("Delete {}?", name)) {
                                            return;
                                        }
                                        let client = client.clone();
                                        let toaster = toaster.clone();
                                        let reload = reload.clone();
                                        let id = id.clone();
                                        spawn_local(async move {
                                            match admin::delete_product(&client, &id).await {
                                                Ok(()) => {
                                                    toaster.success("Product deleted", None);
                                                    reload.set(*reload + 1);
                                                }
                                                Err(err) => toaster.error("Could not delete the product", &err),
                                            }
                                        });
                                    })
                                };
                                html! {
                                    <tr key={product.id.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                                        <td class="px-6 py-4">
                                            <div class="flex items-center gap-3">
                                                <img src={product.image().to_string()} alt={product.name.clone()} class="w-10 h-10 rounded-lg object-cover bg-muted" />
                                                <span class="font-semibold">{ product.name.clone() }</span>
                                            </div>
                                        </td>
                                        <td class="px-6 py-4 text-muted-foreground">{ product.category_name().to_string() }</td>
                                        <td class="px-6 py-4 text-right font-semibold">{ product.price.to_string() }</td>
                                        <td class="px-6 py-4">{ row_actions(on_edit, on_delete) }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            }
        </div>
    }
}
