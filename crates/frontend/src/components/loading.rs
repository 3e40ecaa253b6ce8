//! Loading spinner component.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// Screen-reader text for the spinner
    #[prop_or(AttrValue::Static("Loading"))]
    pub label: AttrValue,
}

/// Loading spinner component.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading" role="status" aria-label={props.label.clone()}>
            <div class="spinner"></div>
        </div>
    }
}
