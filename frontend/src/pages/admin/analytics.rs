use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::analytics::{load_snapshot, AnalyticsSnapshot, BackendReporting};
use crate::app::use_app;
use crate::components::charts::{BarChart, ShareList, ValueFormat};
use crate::components::icons::icon_trending_up;
use crate::components::loading_row;
use crate::components::stat_card::{StatCard, StatIcon};

#[function_component(AnalyticsTab)]
pub fn analytics_tab() -> Html {
    let app = use_app();
    let snapshot = use_state(|| None::<AnalyticsSnapshot>);

    {
        let snapshot = snapshot.clone();
        let client = app.client.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let port = BackendReporting::new(client);
                    snapshot.set(Some(load_snapshot(&port).await));
                });
                || ()
            },
            (),
        );
    }

    let Some(data) = (*snapshot).clone() else {
        return loading_row("Loading analytics...");
    };

    html! {
        <div class="space-y-6">
            if !data.failed.is_empty() {
                <div class="text-sm text-amber-700 bg-amber-50 border border-amber-200 rounded-lg px-4 py-3">
                    { format!("Some figures could not be loaded and are shown as empty: {}", data.failed.join(", ")) }
                </div>
            }
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-5 gap-4">
                <StatCard title="Users" value={data.total_users.to_string()} icon={StatIcon::Users} />
                <StatCard title="Orders" value={data.total_orders.to_string()} icon={StatIcon::Orders} />
                <StatCard title="Revenue" value={data.total_revenue.to_string()} icon={StatIcon::Revenue} />
                <StatCard title="Active plans" value={data.active_subscriptions.to_string()} icon={StatIcon::Subscriptions} />
                <StatCard title="Average order" value={data.average_order_value().to_string()} icon={StatIcon::Average} />
            </div>
            <div class="flex items-center gap-2 text-[#173E63] font-bold">
                { icon_trending_up() }{"Monthly trends"}
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <BarChart title="Orders per month" buckets={data.monthly_orders.clone()} format={ValueFormat::Count} />
                <BarChart title="Revenue per month" buckets={data.monthly_revenue.clone()} format={ValueFormat::Currency} />
                <BarChart title="New users per month" buckets={data.monthly_users.clone()} format={ValueFormat::Count} />
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <ShareList title="Users by type" slices={data.user_types.clone()} />
                <ShareList title="Clients by plan" slices={data.clients_by_plan.clone()} />
            </div>
        </div>
    }
}
