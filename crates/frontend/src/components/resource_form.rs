//! Modal form bound to a form draft.

use core_types::{FieldViolation, FormDraft, FormMode};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResourceFormProps {
    /// Resource kind, e.g. "Skill Type"
    pub kind: AttrValue,
    pub draft: FormDraft,
    pub violations: Vec<FieldViolation>,
    /// Input name and new value
    pub on_input: Callback<(&'static str, String)>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit modal. Inputs carry `pattern` and `title`, so the browser
/// validates them before the submit event fires.
#[function_component(ResourceForm)]
pub fn resource_form(props: &ResourceFormProps) -> Html {
    let mode = props.draft.mode();
    let (heading, action) = match mode {
        FormMode::Create => ("Create", "Create"),
        FormMode::Edit(_) => ("Edit", "Save"),
    };

    let onsubmit = props.on_submit.reform(|e: SubmitEvent| {
        e.prevent_default();
    });
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    let inputs = props.draft.entries().map(|(spec, value)| {
        let name = spec.input_name(mode);
        let oninput = props.on_input.reform(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            (name, input.value())
        });
        let invalid = props.violations.iter().any(|v| v.input == name);

        html! {
            <div class={classes!("form-control", invalid.then_some("invalid"))}>
                <label>
                    { spec.label }
                    <input
                        type="text"
                        {name}
                        value={value.to_string()}
                        pattern={spec.kind.pattern()}
                        title={spec.kind.title()}
                        {oninput}
                    />
                </label>
                if invalid {
                    if let Some(title) = spec.kind.title() {
                        <p class="form-error">{ title }</p>
                    }
                }
            </div>
        }
    });

    html! {
        <div class="modal-overlay">
            <div class="modal card" role="dialog">
                <div class="modal-header">
                    <h2>{ format!("{heading} {}", props.kind) }</h2>
                    <button class="modal-close" type="button" onclick={on_close}>{"×"}</button>
                </div>
                <form {onsubmit}>
                    <div class="modal-body">
                        { for inputs }
                    </div>
                    <div class="modal-footer">
                        <button class="btn btn-primary" type="submit">{ action }</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
