use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{use_app, use_toaster};
use crate::auth::{self, User};
use crate::components::icons::{icon_package, icon_tv, icon_user};
use crate::components::{
    bind_input, bind_select, loading_row, page_shell, tab_bar, INPUT_CLASS, PRIMARY_BUTTON,
};
use crate::orders::{self, Order};
use crate::subscriptions::{self, parse_date_input, IptvPlan, PaymentMethod, Subscription};

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Orders,
    Plans,
    Profile,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Orders, Tab::Plans, Tab::Profile];

    fn label(&self) -> &'static str {
        match self {
            Tab::Orders => "My orders",
            Tab::Plans => "IPTV plans",
            Tab::Profile => "Profile",
        }
    }

    fn icon(&self) -> Html {
        match self {
            Tab::Orders => icon_package(),
            Tab::Plans => icon_tv(),
            Tab::Profile => icon_user(),
        }
    }
}

#[function_component(CustomerDashboard)]
pub fn customer_dashboard() -> Html {
    let app = use_app();
    let tab = use_state(|| Tab::Orders);

    let Some(user) = app.session.clone() else {
        return html! {};
    };

    let content = match *tab {
        Tab::Orders => html! { <OrdersTab user_id={user.id.clone()} /> },
        Tab::Plans => html! { <PlansTab /> },
        Tab::Profile => html! { <ProfileTab user={user.clone()} /> },
    };

    html! {
        { page_shell(
            &format!("Hello, {}", user.first_name()),
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

#[derive(Properties, PartialEq)]
struct OrdersTabProps {
    user_id: String,
}

#[function_component(OrdersTab)]
fn orders_tab(props: &OrdersTabProps) -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let list = use_state(Vec::<Order>::new);
    let loading = use_state(|| true);

    {
        let list = list.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        use_effect_with_deps(
            move |user_id: &String| {
                let user_id = user_id.clone();
                spawn_local(async move {
                    match orders::list_for_user(&client, &user_id).await {
                        Ok(rows) => list.set(rows),
                        Err(err) => toaster.error("Could not load your orders", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            props.user_id.clone(),
        );
    }

    if *loading {
        return loading_row("Loading orders...");
    }
    if list.is_empty() {
        return loading_row("You have no orders yet.");
    }

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                        <th class="px-6 py-4 font-bold">{"Order"}</th>
                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                        <th class="px-6 py-4 font-bold">{"Items"}</th>
                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                        <th class="px-6 py-4 font-bold text-right">{"Total"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    { for list.iter().map(|order| html! {
                        <tr key={order.id.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                            <td class="px-6 py-4 font-mono">{ format!("#{}", order.short_id()) }</td>
                            <td class="px-6 py-4 text-muted-foreground">{ order.placed_on() }</td>
                            <td class="px-6 py-4">
                                { for order.items.iter().map(|item| html! {
                                    <p>{ format!("{} × {} ({})", item.quantity(), item.name(), item.unit_price()) }</p>
                                }) }
                            </td>
                            <td class="px-6 py-4">
                                <span class={format!("status-badge status-{} px-3 py-1 rounded-full text-[10px] font-bold", order.status.tone())}>{ order.status.label().to_string() }</span>
                            </td>
                            <td class="px-6 py-4 text-right font-semibold">{ order.total.to_string() }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[hook]
fn use_plans() -> (UseStateHandle<Vec<IptvPlan>>, UseStateHandle<bool>) {
    let app = use_app();
    let toaster = use_toaster();
    let plans = use_state(Vec::<IptvPlan>::new);
    let loading = use_state(|| true);
    {
        let plans = plans.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match subscriptions::list_plans(&client).await {
                        Ok(rows) => plans.set(rows),
                        Err(err) => toaster.error("Could not load plans", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }
    (plans, loading)
}

#[function_component(PlansTab)]
fn plans_tab() -> Html {
    let (plans, loading) = use_plans();

    if *loading {
        return loading_row("Loading plans...");
    }
    if plans.is_empty() {
        return loading_row("No plans available right now.");
    }

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            { for plans.iter().map(|plan| html! {
                <div key={plan.id.clone()} class="bg-card rounded-[10px] p-6 border border-border space-y-2">
                    <p class="text-muted-foreground text-[10px] font-bold tracking-widest uppercase">{ format!("{} month(s)", plan.duration_months) }</p>
                    <h3 class="text-xl font-bold text-foreground">{ plan.name.clone() }</h3>
                    <p class="text-2xl font-black text-[#1D617A]">{ plan.price.to_string() }</p>
                    <p class="text-sm text-muted-foreground">{ plan.description.clone() }</p>
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProfileTabProps {
    user: User,
}

#[function_component(ProfileTab)]
fn profile_tab(props: &ProfileTabProps) -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let name = use_state(|| props.user.name.clone());
    let email = use_state(|| props.user.email.clone());
    let saving = use_state(|| false);

    let on_save = {
        let name = name.clone();
        let email = email.clone();
        let saving = saving.clone();
        let client = app.client.clone();
        let sign_in = app.sign_in.clone();
        let user = props.user.clone();
        Callback::from(move |_| {
            let name = (*name).clone();
            let email = (*email).clone();
            let saving = saving.clone();
            let client = client.clone();
            let sign_in = sign_in.clone();
            let toaster = toaster.clone();
            let user = user.clone();
            saving.set(true);
            spawn_local(async move {
                match auth::update_profile(&client, &user, &name, &email).await {
                    Ok(updated) => {
                        toaster.success("Profile saved", None);
                        sign_in.emit(updated);
                    }
                    Err(err) => toaster.error("Could not save your profile", &err.into()),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <div class="bg-card rounded-[10px] p-6 border border-border space-y-4">
                <h3 class="font-bold text-foreground text-lg">{"Personal details"}</h3>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Name"}</label>
                    <input class={INPUT_CLASS} value={(*name).clone()} oninput={bind_input(&name)} />
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Email"}</label>
                    <input type="email" class={INPUT_CLASS} value={(*email).clone()} oninput={bind_input(&email)} />
                </div>
                <button type="button" class={PRIMARY_BUTTON} disabled={*saving} onclick={on_save}>
                    { if *saving { "Saving..." } else { "Save" } }
                </button>
            </div>
            <SubscriptionEditor user_id={props.user.id.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SubscriptionEditorProps {
    user_id: String,
}

#[function_component(SubscriptionEditor)]
fn subscription_editor(props: &SubscriptionEditorProps) -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let (plans, _) = use_plans();
    let current = use_state(|| None::<Subscription>);
    let reload = use_state(|| 0u32);
    let plan_id = use_state(String::new);
    let payment_date = use_state(String::new);
    let method = use_state(String::new);
    let saving = use_state(|| false);

    {
        let current = current.clone();
        let plan_id = plan_id.clone();
        let client = app.client.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |(user_id, _): &(String, u32)| {
                let user_id = user_id.clone();
                spawn_local(async move {
                    match subscriptions::active_for(&client, &user_id).await {
                        Ok(found) => {
                            plan_id.set(found.as_ref().map(|s| s.plan_id.clone()).unwrap_or_default());
                            current.set(found);
                        }
                        Err(err) => toaster.error("Could not load your subscription", &err.into()),
                    }
                });
                || ()
            },
            (props.user_id.clone(), *reload),
        );
    }

    let on_submit = {
        let current = current.clone();
        let plan_id = plan_id.clone();
        let payment_date = payment_date.clone();
        let method = method.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        let client = app.client.clone();
        let user_id = props.user_id.clone();
        Callback::from(move |_| {
            let existing = (*current).clone();
            let plan = (*plan_id).clone();
            let date = parse_date_input(&payment_date);
            let payment_method = PaymentMethod::from_key(&method);
            let client = client.clone();
            let user_id = user_id.clone();
            let toaster = toaster.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match &existing {
                    Some(sub) => subscriptions::change_plan(&client, sub, &plan, date).await,
                    None => subscriptions::subscribe(&client, &user_id, &plan, date, payment_method)
                        .await
                        .map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        toaster.success(
                            if existing.is_some() { "Plan changed" } else { "Subscription created" },
                            None,
                        );
                        reload.set(*reload + 1);
                    }
                    Err(err) => toaster.error("Could not save the subscription", &err),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border space-y-4">
            <h3 class="font-bold text-foreground text-lg">{"IPTV subscription"}</h3>
            {
                match &*current {
                    Some(sub) => html! {
                        <div class="text-sm space-y-1">
                            <p>
                                <span class="text-muted-foreground">{"Current plan: "}</span>
                                <span class="font-semibold">{ sub.plan.as_ref().map(|p| format!("{} ({})", p.name, p.price)).unwrap_or_else(|| "-".to_string()) }</span>
                            </p>
                            <p>
                                <span class="text-muted-foreground">{"Next payment: "}</span>
                                <span class="font-semibold">{ sub.next_payment_label() }</span>
                            </p>
                            if let Some(paid_with) = sub.payment_method {
                                <p>
                                    <span class="text-muted-foreground">{"Payment method: "}</span>
                                    <span class="font-semibold">{ paid_with.label() }</span>
                                </p>
                            }
                        </div>
                    },
                    None => html! { <p class="text-sm text-muted-foreground">{"You have no active plan."}</p> },
                }
            }
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{"Plan"}</label>
                <select class={INPUT_CLASS} onchange={bind_select(&plan_id)}>
                    <option value="" selected={plan_id.is_empty()}>{"Choose a plan"}</option>
                    { for plans.iter().map(|plan| html! {
                        <option value={plan.id.clone()} selected={*plan_id == plan.id}>{ plan.option_label() }</option>
                    }) }
                </select>
            </div>
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{"Next payment date"}</label>
                <input type="date" class={INPUT_CLASS} value={(*payment_date).clone()} oninput={bind_input(&payment_date)} />
            </div>
            if current.is_none() {
                <div class="space-y-1">
                    <label class="text-sm font-medium text-foreground">{"Payment method"}</label>
                    <select class={INPUT_CLASS} onchange={bind_select(&method)}>
                        <option value="" selected={method.is_empty()}>{"Choose a method"}</option>
                        { for PaymentMethod::ALL.iter().map(|m| html! {
                            <option value={m.key()} selected={*method == m.key()}>{ m.label() }</option>
                        }) }
                    </select>
                </div>
            }
            <button type="button" class={PRIMARY_BUTTON} disabled={*saving} onclick={on_submit}>
                { if *saving { "Saving..." } else if current.is_some() { "Change plan" } else { "Subscribe" } }
            </button>
        </div>
    }
}
