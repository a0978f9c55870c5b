use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{field, form_panel, row_actions, section_header, Editing};
use crate::admin::{self, AffiliateForm};
use crate::app::{use_app, use_toaster};
use crate::catalog::{self, AffiliateProduct, Listing};
use crate::components::icons::icon_external_link;
use crate::components::{confirm, edit_field, edit_text_area, loading_row, INPUT_CLASS};

#[function_component(AffiliatesTab)]
pub fn affiliates_tab() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let items = use_state(Vec::<AffiliateProduct>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let editing = use_state(|| None::<Editing>);
    let form = use_state(AffiliateForm::default);
    let saving = use_state(|| false);

    {
        let items = items.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match catalog::load_affiliate_products(&client).await {
                        Ok(rows) => items.set(rows),
                        Err(err) => toaster.error("Could not load blog products", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    let on_new = {
        let editing = editing.clone();
        let form = form.clone();
        Callback::from(move |_| {
            form.set(AffiliateForm::default());
            editing.set(Some(Editing::New));
        })
    };

    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let on_save = {
        let editing = editing.clone();
        let form = form.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        Callback::from(move |_| {
            let Some(target) = (*editing).clone() else {
                return;
            };
            let submitted = (*form).clone();
            let editing = editing.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            let client = client.clone();
            let toaster = toaster.clone();
            saving.set(true);
            spawn_local(async move {
                match admin::save_affiliate(&client, target.id(), submitted).await {
                    Ok(()) => {
                        toaster.success("Blog product saved", None);
                        editing.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(err) => toaster.error("Could not save the blog product", &err),
                }
                saving.set(false);
            });
        })
    };

    let editor = match &*editing {
        Some(target) => form_panel(
            target.title("blog product"),
            *saving,
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
                        <input class={INPUT_CLASS} value={form.category.clone()} oninput={edit_field(&form, |f, v| f.category = v)} />
                    }) }
                    { field("Image URL", html! {
                        <input class={INPUT_CLASS} value={form.image_url.clone()} oninput={edit_field(&form, |f, v| f.image_url = v)} />
                    }) }
                    <div class="md:col-span-2">
                        { field("Partner link", html! {
                            <input type="url" class={INPUT_CLASS} placeholder="https://" value={form.link.clone()} oninput={edit_field(&form, |f, v| f.link = v)} />
                        }) }
                    </div>
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
            { section_header("Blog products", on_new) }
            { editor }
            if *loading {
                { loading_row("Loading blog products...") }
            } else {
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-6 py-4 font-bold">{"Product"}</th>
                                <th class="px-6 py-4 font-bold">{"Category"}</th>
                                <th class="px-6 py-4 font-bold">{"Link"}</th>
                                <th class="px-6 py-4 font-bold text-right">{"Price"}</th>
                                <th class="px-6 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { for items.iter().map(|item| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let form = form.clone();
                                    let item = item.clone();
                                    Callback::from(move |_| {
                                        form.set(AffiliateForm::from_item(&item));
                                        editing.set(Some(Editing::Existing(item.id.clone())));
                                    })
                                };
                                let on_delete = {
                                    let client = app.client.clone();
                                    let toaster = toaster.clone();
                                    let reload = reload.clone();
                                    let id = item.id.clone();
                                    let name = item.name.clone();
                                    Callback::from(move |_| {
                                        if !confirm(&format!("Delete {}?", name)) {
                                            return;
                                        }
                                        let client = client.clone();
                                        let toaster = toaster.clone();
                                        let reload = reload.clone();
                                        let id = id.clone();
                                        spawn_local(async move {
                                            match admin::delete_affiliate(&client, &id).await {
                                                Ok(()) => {
                                                    toaster.success("Blog product deleted", None);
                                                    reload.set(*reload + 1);
                                                }
                                                Err(err) => toaster.error("Could not delete the blog product", &err),
                                            }
                                        });
                                    })
                                };
                                html! {
                                    <tr key={item.id.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                                        <td class="px-6 py-4">
                                            <div class="flex items-center gap-3">
                                                <img src={item.image().to_string()} alt={item.name.clone()} class="w-10 h-10 rounded-lg object-cover bg-muted" />
                                                <span class="font-semibold">{ item.name.clone() }</span>
                                            </div>
                                        </td>
                                        <td class="px-6 py-4 text-muted-foreground">{ item.category_name().to_string() }</td>
                                        <td class="px-6 py-4">
                                            <a href={item.link.clone()} target="_blank" rel="noopener noreferrer" class="flex items-center gap-1 text-[#1D617A] hover:underline">
                                                { icon_external_link() }{"Open"}
                                            </a>
                                        </td>
                                        <td class="px-6 py-4 text-right font-semibold">{ item.price.to_string() }</td>
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
