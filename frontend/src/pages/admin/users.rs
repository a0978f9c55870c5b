use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{field, form_panel, row_actions, section_header, Editing};
use crate::admin::{self, UserForm};
use crate::app::{use_app, use_toaster};
use crate::auth::{PasswordHasher, Role, User};
use crate::components::{confirm, edit_field, edit_select, loading_row, INPUT_CLASS};

#[function_component(UsersTab)]
pub fn users_tab() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let users = use_state(Vec::<User>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let editing = use_state(|| None::<Editing>);
    let form = use_state(UserForm::default);
    let saving = use_state(|| false);

    {
        let users = users.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match admin::list_users(&client).await {
                        Ok(rows) => users.set(rows),
                        Err(err) => toaster.error("Could not load users", &err),
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
            form.set(UserForm {
                role: Some(Role::Customer),
                ..UserForm::default()
            });
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
                let result = match target.id() {
                    Some(id) => admin::update_user(&client, id, submitted).await,
                    None => admin::create_user(&client, &PasswordHasher::new(), submitted)
                        .await
                        .map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        toaster.success("User saved", None);
                        editing.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(err) => toaster.error("Could not save the user", &err),
                }
                saving.set(false);
            });
        })
    };

    let editor = match &*editing {
        Some(target) => form_panel(
            target.title("user"),
            *saving,
            on_save,
            on_close,
            html! {
                <>
                    { field("Name", html! {
                        <input class={INPUT_CLASS} value={form.name.clone()} oninput={edit_field(&form, |f, v| f.name = v)} />
                    }) }
                    { field("Email", html! {
                        <input type="email" class={INPUT_CLASS} value={form.email.clone()} oninput={edit_field(&form, |f, v| f.email = v)} />
                    }) }
                    if matches!(target, Editing::New) {
                        { field("Password", html! {
                            <input type="password" class={INPUT_CLASS} value={form.password.clone()} oninput={edit_field(&form, |f, v| f.password = v)} />
                        }) }
                    }
                    { field("Phone", html! {
                        <input class={INPUT_CLASS} value={form.phone.clone()} oninput={edit_field(&form, |f, v| f.phone = v)} />
                    }) }
                    { field("Type", html! {
                        <select class={INPUT_CLASS} onchange={edit_select(&form, |f, v| f.role = Role::parse(&v))}>
                            { for Role::ALL.iter().map(|role| html! {
                                <option value={role.as_str()} selected={form.role == Some(*role)}>{ role.label() }</option>
                            }) }
                        </select>
                    }) }
                </>
            },
        ),
        None => html! {},
    };

    html! {
        <div class="space-y-4">
            { section_header("Users", on_new) }
            { editor }
            if *loading {
                { loading_row("Loading users...") }
            } else {
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-6 py-4 font-bold">{"Name"}</th>
                                <th class="px-6 py-4 font-bold">{"Email"}</th>
                                <th class="px-6 py-4 font-bold">{"Phone"}</th>
                                <th class="px-6 py-4 font-bold">{"Type"}</th>
                                <th class="px-6 py-4"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { for users.iter().map(|user| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let form = form.clone();
                                    let user = user.clone();
                                    Callback::from(move |_| {
                                        form.set(UserForm::from_user(&user));
                                        editing.set(Some(Editing::Existing(user.id.clone())));
                                    })
                                };
                                let on_delete = {
                                    let client = app.client.clone();
                                    let toaster = toaster.clone();
                                    let reload = reload.clone();
                                    let id = user.id.clone();
                                    let name = user.name.clone();
                                    Callback::from(move |_| {
                                        if !confirm(&format!("Delete user {}?", name)) {
                                            return;
                                        }
                                        let client = client.clone();
                                        let toaster = toaster.clone();
                                        let reload = reload.clone();
                                        let id = id.clone();
                                        spawn_local(async move {
                                            match admin::delete_user(&client, &id).await {
                                                Ok(()) => {
                                                    toaster.success("User deleted", None);
                                                    reload.set(*reload + 1);
                                                }
                                                Err(err) => toaster.error("Could not delete the user", &err),
                                            }
                                        });
                                    })
                                };
                                html! {
                                    <tr key={user.id.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                                        <td class="px-6 py-4 font-semibold">{ user.name.clone() }</td>
                                        <td class="px-6 py-4 text-muted-foreground">{ user.email.clone() }</td>
                                        <td class="px-6 py-4 text-muted-foreground">{ user.phone.clone().unwrap_or_default() }</td>
                                        <td class="px-6 py-4">
                                            <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ user.role.label() }</span>
                                        </td>
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
