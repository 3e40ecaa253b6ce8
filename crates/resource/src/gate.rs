//! Confirmation before destructive mutations.

use core_types::Resource;

use crate::Mutation;

/// Holds the record awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationGate<R> {
    selected: Option<R>,
}

impl<R> Default for ConfirmationGate<R> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<R: Resource> ConfirmationGate<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation to delete a record.
    pub fn open(&mut self, record: R) {
        self.selected = Some(record);
    }

    /// Close without side effects.
    pub fn cancel(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    /// Close the gate and hand out the delete for the selected record.
    ///
    /// The gate closes whatever the delete's eventual outcome. A closed
    /// gate yields nothing.
    pub fn confirm(&mut self) -> Option<Mutation> {
        self.selected.take().map(|record| Mutation::Delete {
            id: record.id(),
            label: record.label().to_string(),
        })
    }
}
