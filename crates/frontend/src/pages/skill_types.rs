//! Skill types list screen.

use core_types::{Resource, SkillType};
use resource::ResourceClient;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::BrowserTransport;
use crate::components::{ConfirmDialog, Loading, ResourceForm, ToastStack};
use crate::state::{ScreenAction, SkillTypeState};

fn client() -> ResourceClient<SkillType, BrowserTransport> {
    ResourceClient::new(BrowserTransport::default())
}

/// Callback that dispatches a fixed action, ignoring its input.
fn on_event<IN: 'static>(
    state: &UseReducerHandle<SkillTypeState>,
    action: fn() -> ScreenAction<SkillType>,
) -> Callback<IN> {
    let dispatcher = state.dispatcher();
    Callback::from(move |_: IN| dispatcher.dispatch(action()))
}

/// Skill types page: table, create/edit modal, delete dialog and toasts.
#[function_component(SkillTypesPage)]
pub fn skill_types_page() -> Html {
    let state = use_reducer(SkillTypeState::default);

    // Fetch on mount
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            dispatcher.dispatch(ScreenAction::LoadStarted);
            spawn_local(async move {
                let fetched = client().fetch().await;
                dispatcher.dispatch(ScreenAction::Fetched(fetched));
            });
        });
    }

    // Send each queued mutation once; a success re-fetches while loading
    {
        let dispatcher = state.dispatcher();
        use_effect_with(state.pending.clone(), move |pending| {
            if let Some(pending) = pending.clone() {
                spawn_local(async move {
                    let client = client();
                    let result = client.mutate(&pending.mutation).await;
                    let succeeded = result.is_ok();
                    dispatcher.dispatch(ScreenAction::MutationFinished(pending.mutation, result));
                    if succeeded {
                        let fetched = client.fetch().await;
                        dispatcher.dispatch(ScreenAction::Fetched(fetched));
                    }
                });
            }
        });
    }

    let on_create: Callback<MouseEvent> = on_event(&state, || ScreenAction::OpenCreate);
    let on_close: Callback<()> = on_event(&state, || ScreenAction::CloseForm);
    let on_submit: Callback<()> = on_event(&state, || ScreenAction::Submit);
    let on_cancel_delete: Callback<()> = on_event(&state, || ScreenAction::CancelDelete);
    let on_confirm_delete: Callback<()> = on_event(&state, || ScreenAction::ConfirmDelete);
    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(input, value): (&'static str, String)| {
            dispatcher.dispatch(ScreenAction::SetField(input, value));
        })
    };
    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(ScreenAction::DismissToast(id)))
    };

    let screen = &state.screen;
    let rows = screen.store().iter().map(|record| {
        let on_edit = {
            let dispatcher = state.dispatcher();
            let record = record.clone();
            Callback::from(move |_: MouseEvent| {
                dispatcher.dispatch(ScreenAction::OpenEdit(record.clone()));
            })
        };
        let on_delete = {
            let dispatcher = state.dispatcher();
            let record = record.clone();
            Callback::from(move |_: MouseEvent| {
                dispatcher.dispatch(ScreenAction::RequestDelete(record.clone()));
            })
        };

        html! {
            <tr key={record.id.0}>
                <td>{ &record.name }</td>
                <td>{ record.cost_per_day.to_string() }</td>
                <td>{ record.error_rate.to_string() }</td>
                <td>{ record.throughput.to_string() }</td>
                <td>{ record.management_quality.to_string() }</td>
                <td>{ record.development_quality.to_string() }</td>
                <td>{ record.signing_bonus.to_string() }</td>
                <td class="row-actions">
                    <button class="btn btn-sm" onclick={on_edit}>{"Edit"}</button>
                    <button class="btn btn-sm btn-danger" onclick={on_delete}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div>
            <div class="page-header">
                <h1>{"Skill Types"}</h1>
                <button class="btn btn-primary" onclick={on_create}>{"Create Skill Type"}</button>
            </div>

            if screen.is_loading() {
                <Loading label="Loading skill types" />
            } else if screen.store().is_empty() {
                <div class="card">
                    <p>{"No skill types found."}</p>
                </div>
            } else {
                <div class="card">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{"Name"}</th>
                                <th>{"Cost per Day"}</th>
                                <th>{"Error Rate"}</th>
                                <th>{"Throughput"}</th>
                                <th>{"Management Quality"}</th>
                                <th>{"Development Quality"}</th>
                                <th>{"Signing Bonus"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            { for rows }
                        </tbody>
                    </table>
                </div>
            }

            if let Some(draft) = screen.form().draft() {
                <ResourceForm
                    kind={SkillType::KIND}
                    draft={draft.clone()}
                    violations={screen.form().violations().to_vec()}
                    {on_input}
                    {on_submit}
                    {on_close}
                />
            }

            if let Some(selected) = screen.gate().selected() {
                <ConfirmDialog
                    title={format!("Delete {}", SkillType::KIND)}
                    label={selected.label().to_string()}
                    on_confirm={on_confirm_delete}
                    on_cancel={on_cancel_delete}
                />
            }

            <ToastStack toasts={screen.toasts().to_vec()} {on_dismiss} />
        </div>
    }
}
