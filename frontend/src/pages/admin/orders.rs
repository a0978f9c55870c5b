use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{use_app, use_toaster};
use crate::components::loading_row;
use crate::orders::{self, Order};

#[function_component(OrdersTab)]
pub fn orders_tab() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let list = use_state(Vec::<Order>::new);
    let loading = use_state(|| true);

    {
        let list = list.clone();
        let loading = loading.clone();
        let client = app.client.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match orders::list_all(&client).await {
                        Ok(rows) => list.set(rows),
                        Err(err) => toaster.error("Could not load orders", &err.into()),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    if *loading {
        return loading_row("Loading orders...");
    }
    if list.is_empty() {
        return loading_row("No orders yet.");
    }

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
            <div class="px-6 py-4 border-b border-border flex justify-between items-center">
                <h2 class="font-bold text-foreground text-lg">{"Orders"}</h2>
                <span class="text-sm text-muted-foreground">{ format!("{} order(s)", list.len()) }</span>
            </div>
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                        <th class="px-6 py-4 font-bold">{"Order"}</th>
                        <th class="px-6 py-4 font-bold">{"Customer"}</th>
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
                            <td class="px-6 py-4">
                                <p class="font-semibold">{ order.customer().to_string() }</p>
                                if let Some(email) = &order.user_email {
                                    <p class="text-xs text-muted-foreground">{ email.clone() }</p>
                                }
                            </td>
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
