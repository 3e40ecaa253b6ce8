//! Reducer wrapper around the resource screen.

use core_types::{Resource, SkillType};
use resource::{ClientError, Mutation, ResourceScreen};
use std::rc::Rc;
use yew::Reducible;

/// A mutation waiting to be sent. `seq` tells repeated submits apart.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub seq: u64,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<R> {
    pub screen: ResourceScreen<R>,
    pub pending: Option<PendingMutation>,
    seq: u64,
}

impl<R: Resource> Default for ScreenState<R> {
    fn default() -> Self {
        Self {
            screen: ResourceScreen::new(),
            pending: None,
            seq: 0,
        }
    }
}

impl<R: Resource> ScreenState<R> {
    fn queue(&mut self, mutation: Mutation) {
        self.seq += 1;
        self.pending = Some(PendingMutation {
            seq: self.seq,
            mutation,
        });
    }
}

pub enum ScreenAction<R> {
    LoadStarted,
    Fetched(Result<Vec<R>, ClientError>),
    OpenCreate,
    OpenEdit(R),
    CloseForm,
    SetField(&'static str, String),
    Submit,
    RequestDelete(R),
    CancelDelete,
    ConfirmDelete,
    /// The mutation request returned. A success starts the re-fetch.
    MutationFinished(Mutation, Result<(), ClientError>),
    DismissToast(u64),
}

impl<R: Resource> Reducible for ScreenState<R> {
    type Action = ScreenAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ScreenAction::LoadStarted => next.screen.begin_load(),
            ScreenAction::Fetched(fetched) => {
                next.screen.apply_fetch(fetched);
            }
            ScreenAction::OpenCreate => next.screen.form_mut().open_create(),
            ScreenAction::OpenEdit(record) => {
                if let Err(e) = next.screen.form_mut().open_edit(&record) {
                    log::error!("Cannot edit {}: {}", record.label(), e);
                }
            }
            ScreenAction::CloseForm => next.screen.form_mut().close(),
            ScreenAction::SetField(input, value) => {
                if let Err(e) = next.screen.form_mut().set(input, value) {
                    log::warn!("Ignoring input {input}: {e}");
                }
            }
            ScreenAction::Submit => {
                if let Some(mutation) = next.screen.submit_form() {
                    next.queue(mutation);
                }
            }
            ScreenAction::RequestDelete(record) => next.screen.request_delete(record),
            ScreenAction::CancelDelete => next.screen.cancel_delete(),
            ScreenAction::ConfirmDelete => {
                if let Some(mutation) = next.screen.confirm_delete() {
                    next.queue(mutation);
                }
            }
            ScreenAction::MutationFinished(mutation, result) => {
                next.pending = None;
                next.screen.apply_mutation(&mutation, result);
            }
            ScreenAction::DismissToast(id) => next.screen.dismiss_toast(id),
        }
        Rc::new(next)
    }
}

pub type SkillTypeState = ScreenState<SkillType>;
