use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::icons::icon_x;
use crate::app::use_toaster;
use crate::toast::{Toast, ToastKind};

#[function_component(ToastStack)]
pub fn toast_stack() -> Html {
    let toaster = use_toaster();
    if toaster.queue().is_empty() {
        return html! {};
    }

    html! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for toaster.queue().iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let toaster = use_toaster();
    let toast = &props.toast;

    {
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |(id, kind): &(u64, ToastKind)| {
                let id = *id;
                let timeout = Timeout::new(kind.lifetime_ms(), move || toaster.dismiss(id));
                // Dropping the timeout on unmount cancels it.
                move || drop(timeout)
            },
            (toast.id, toast.kind),
        );
    }

    let tone = match toast.kind {
        ToastKind::Success => "border-green-500",
        ToastKind::Error => "border-red-500",
        ToastKind::Info => "border-primary",
    };
    let on_dismiss = {
        let id = toast.id;
        Callback::from(move |_| toaster.dismiss(id))
    };

    html! {
        <div class={classes!("bg-white", "border-l-4", "rounded-xl", "shadow-lg", "px-4", "py-3", "flex", "items-start", "gap-3", tone)}>
            <div class="flex-1">
                <p class="text-sm font-bold text-[#173E63]">{ toast.title.clone() }</p>
                if let Some(message) = &toast.message {
                    <p class="text-xs text-slate-500 mt-1">{ message.clone() }</p>
                }
            </div>
            <button type="button" class="text-slate-400 hover:text-slate-600" aria-label="Dismiss" onclick={on_dismiss}>
                { icon_x() }
            </button>
        </div>
    }
}
