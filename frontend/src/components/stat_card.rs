use yew::prelude::*;

use super::icons::{icon_arrow_up_right, icon_credit_card, icon_package, icon_tv, icon_users};

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    Users,
    Orders,
    Revenue,
    Subscriptions,
    Average,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub value: String,
    pub icon: StatIcon,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ props.value.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::Users => icon_users(),
                        StatIcon::Orders => icon_package(),
                        StatIcon::Revenue => icon_credit_card(),
                        StatIcon::Subscriptions => icon_tv(),
                        StatIcon::Average => icon_arrow_up_right(),
                    }
                }
            </div>
        </div>
    }
}
