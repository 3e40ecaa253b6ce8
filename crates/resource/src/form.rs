//! Create/edit form panel.

use core_types::{DraftError, FieldSpec, FieldViolation, FormDraft, FormMode, Resource};
use thiserror::Error;

use crate::Mutation;

/// Why a form could not be turned into a mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("No form is open")]
    Closed,

    #[error("{} field(s) do not match their pattern", .0.len())]
    Invalid(Vec<FieldViolation>),

    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// A modal form bound to a [`FormDraft`].
///
/// The panel is open while it holds a draft. Closing discards the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPanel {
    fields: &'static [FieldSpec],
    draft: Option<FormDraft>,
    violations: Vec<FieldViolation>,
}

impl FormPanel {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            draft: None,
            violations: Vec::new(),
        }
    }

    /// Open a blank create form.
    pub fn open_create(&mut self) {
        self.draft = Some(FormDraft::create(self.fields));
        self.violations.clear();
    }

    /// Open an edit form pre-populated from a record.
    pub fn open_edit<R: Resource>(&mut self, record: &R) -> Result<(), SubmitError> {
        self.draft = Some(FormDraft::edit(record)?);
        self.violations.clear();
        Ok(())
    }

    pub fn close(&mut self) {
        self.draft = None;
        self.violations.clear();
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.draft.as_ref().map(FormDraft::mode)
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.draft.as_ref()
    }

    /// Violations found by the last submit attempt.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Update one input of the open draft.
    pub fn set(&mut self, input: &str, value: impl Into<String>) -> Result<(), SubmitError> {
        let draft = self.draft.as_mut().ok_or(SubmitError::Closed)?;
        draft.set(input, value)?;
        Ok(())
    }

    pub fn value(&self, input: &str) -> Option<&str> {
        self.draft.as_ref().and_then(|d| d.value(input))
    }

    /// Turn the draft into a create or update mutation.
    ///
    /// The panel stays open; the caller closes it once the mutation
    /// has succeeded.
    pub fn submit(&mut self) -> Result<Mutation, SubmitError> {
        let draft = self.draft.as_ref().ok_or(SubmitError::Closed)?;

        let violations = draft.violations();
        if !violations.is_empty() {
            self.violations = violations.clone();
            return Err(SubmitError::Invalid(violations));
        }
        self.violations.clear();

        let body = draft.to_body()?;
        let label = draft.label().to_string();
        Ok(match draft.mode() {
            FormMode::Create => Mutation::Create { body, label },
            FormMode::Edit(id) => Mutation::Update { id, body, label },
        })
    }
}
