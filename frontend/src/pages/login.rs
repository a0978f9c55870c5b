use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::use_app;
use crate::auth::{self, AuthError, PasswordHasher};
use crate::components::{bind_input, INPUT_CLASS};
use crate::error::AppError;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let app = use_app();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        let sign_in = app.sign_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = (*email).clone();
            let password_val = (*password).clone();

            if email_val.trim().is_empty() || password_val.is_empty() {
                error.set(Some(AuthError::MissingCredentials.to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let client = client.clone();
            let sign_in = sign_in.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                let hasher = PasswordHasher::new();
                match auth::login(&client, &hasher, &email_val, &password_val).await {
                    Ok(user) => sign_in.emit(user),
                    Err(err) => error.set(Some(AppError::from(err).user_message())),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Welcome back"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Sign in to see your orders and plans."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input type="email" class={INPUT_CLASS} value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input type="password" class={INPUT_CLASS} value={(*password).clone()} oninput={bind_input(&password)} />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
