//! Delete confirmation dialog.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    /// Dialog heading, e.g. "Delete Skill Type"
    pub title: AttrValue,
    /// Name of the record about to be deleted
    pub label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal asking the user to confirm a delete.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-overlay">
            <div class="modal card" role="alertdialog">
                <h2>{ &props.title }</h2>
                <p>
                    {"Are you sure you want to delete "}
                    <b>{ &props.label }</b>
                    {"?"}
                </p>
                <div class="modal-footer">
                    <button class="btn" onclick={on_cancel}>{"Cancel"}</button>
                    <button class="btn btn-danger" onclick={on_confirm}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}
