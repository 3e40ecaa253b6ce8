//! Transient toast notifications.

use gloo_timers::callback::Timeout;
use resource::{Toast, ToastStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

/// Stack of toasts in the corner of the screen.
#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack">
            { for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    on_dismiss={props.on_dismiss.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let id = props.toast.id;
        let duration = props.toast.duration_ms;
        let on_dismiss = props.on_dismiss.clone();
        // Dropping the timeout on unmount cancels it.
        use_effect_with(id, move |_| {
            let timeout = Timeout::new(duration, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let class = match props.toast.status {
        ToastStatus::Success => "toast toast-success",
        ToastStatus::Error => "toast toast-error",
    };
    let on_close = {
        let id = props.toast.id;
        props.on_dismiss.reform(move |_: MouseEvent| id)
    };

    html! {
        <div {class} role="status">
            <span>{ &props.toast.title }</span>
            <button class="toast-close" onclick={on_close}>{"×"}</button>
        </div>
    }
}
