use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use yew::prelude::*;

use crate::analytics::{MonthBucket, Slice};
use crate::money::format_brl;

#[derive(Clone, Copy, PartialEq)]
pub enum ValueFormat {
    Count,
    Currency,
}

fn format_value(value: Decimal, format: ValueFormat) -> String {
    match format {
        ValueFormat::Count => value.normalize().to_string(),
        ValueFormat::Currency => format_brl(value),
    }
}

/// Bar height as a percentage of the largest bucket.
fn bar_percent(value: Decimal, max: Decimal) -> u32 {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    ((value / max) * Decimal::from(100))
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(100)
}

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub title: &'static str,
    pub buckets: Vec<MonthBucket>,
    pub format: ValueFormat,
}

#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    let max = props
        .buckets
        .iter()
        .map(|b| b.value)
        .max()
        .unwrap_or(Decimal::ZERO);

    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border">
            <h3 class="font-bold text-foreground text-lg mb-4">{ props.title }</h3>
            { if props.buckets.is_empty() {
                html! { <p class="text-sm text-muted-foreground">{"No data yet."}</p> }
            } else {
                html! {
                    <div class="flex items-end gap-3 h-48">
                        { for props.buckets.iter().map(|bucket| {
                            let percent = bar_percent(bucket.value, max);
                            let label = format_value(bucket.value, props.format);
                            html! {
                                <div class="flex-1 flex flex-col items-center justify-end h-full" title={format!("{}: {}", bucket.month, label)}>
                                    <span class="text-[10px] text-muted-foreground mb-1">{ label.clone() }</span>
                                    <div class="w-full bg-primary rounded-t" style={format!("height: {}%", percent.max(2))}></div>
                                    <span class="text-[10px] text-muted-foreground mt-1">{ bucket.month.short_label() }</span>
                                </div>
                            }
                        }) }
                    </div>
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ShareListProps {
    pub title: &'static str,
    pub slices: Vec<Slice>,
}

/// Proportional breakdown, one row per slice.
#[function_component(ShareList)]
pub fn share_list(props: &ShareListProps) -> Html {
    let total: u64 = props.slices.iter().map(|s| s.value).sum();

    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border">
            <h3 class="font-bold text-foreground text-lg mb-4">{ props.title }</h3>
            { if props.slices.is_empty() {
                html! { <p class="text-sm text-muted-foreground">{"No data yet."}</p> }
            } else {
                html! {
                    <div class="space-y-3">
                        { for props.slices.iter().map(|slice| {
                            let percent = if total > 0 { slice.value * 100 / total } else { 0 };
                            let bar = if slice.muted { "h-full bg-slate-300" } else { "h-full bg-primary" };
                            html! {
                                <div class="flex flex-col gap-1 text-sm">
                                    <div class="flex items-center justify-between">
                                        <span class={if slice.muted { "text-muted-foreground" } else { "text-foreground" }}>{ slice.label.clone() }</span>
                                        <span class="text-muted-foreground">{ format!("{} ({}%)", slice.value, percent) }</span>
                                    </div>
                                    <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                                        <div class={bar} style={format!("width: {}%", percent)}></div>
                                    </div>
                                </div>
                            }
                        }) }
                    </div>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_bucket() {
        assert_eq!(bar_percent(Decimal::from(5), Decimal::from(10)), 50);
        assert_eq!(bar_percent(Decimal::from(10), Decimal::from(10)), 100);
        assert_eq!(bar_percent(Decimal::ZERO, Decimal::from(10)), 0);
        assert_eq!(bar_percent(Decimal::from(3), Decimal::ZERO), 0);
    }

    #[test]
    fn values_format_by_kind() {
        assert_eq!(format_value(Decimal::new(200, 2), ValueFormat::Count), "2");
        assert_eq!(format_value(Decimal::new(150050, 2), ValueFormat::Currency), "R$ 1.500,50");
    }
}
