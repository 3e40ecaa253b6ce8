//! The resource list screen: state plus the async driver.
//!
//! [`ResourceScreen`] is plain state with synchronous transitions, so a
//! UI can keep it in a reducer and never hold it across an `.await`.
//! Network work happens in [`ResourceClient`], whose results are applied
//! back with `apply_mutation` / `apply_fetch`. A successful mutation
//! starts a load, so the caller re-fetches exactly once afterwards.
//! [`ScreenController`] combines both for callers that own the state.

use core_types::Resource;

use crate::form::{FormPanel, SubmitError};
use crate::gate::ConfirmationGate;
use crate::store::ResourceStore;
use crate::toast::Toast;
use crate::transport::Transport;
use crate::{Mutation, ResourceClient, Result};

/// State of one resource list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceScreen<R> {
    store: ResourceStore<R>,
    loading: bool,
    form: FormPanel,
    gate: ConfirmationGate<R>,
    toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl<R: Resource> Default for ResourceScreen<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new() -> Self {
        Self {
            store: ResourceStore::new(),
            loading: false,
            form: FormPanel::new(R::FIELDS),
            gate: ConfirmationGate::new(),
            toasts: Vec::new(),
            next_toast_id: 1,
        }
    }

    pub fn store(&self) -> &ResourceStore<R> {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &FormPanel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormPanel {
        &mut self.form
    }

    pub fn gate(&self) -> &ConfirmationGate<R> {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut ConfirmationGate<R> {
        &mut self.gate
    }

    /// Toasts waiting to be shown or dismissed.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn push_toast(&mut self, mut toast: Toast) -> u64 {
        toast.id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(toast);
        self.next_toast_id - 1
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply a fetch result. Failures are logged and leave the store as it was.
    ///
    /// The loading flag is cleared either way.
    pub fn apply_fetch(&mut self, fetched: Result<Vec<R>>) -> bool {
        let applied = match fetched.and_then(|records| self.store.replace(records)) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to fetch {}: {}", R::KIND, e);
                false
            }
        };
        self.loading = false;
        applied
    }

    /// Build the mutation for the open form.
    ///
    /// Pattern violations keep the form open with no toast, as a browser
    /// blocks the submit. Drafts that cannot be serialized raise an error toast.
    pub fn submit_form(&mut self) -> Option<Mutation> {
        match self.form.submit() {
            Ok(mutation) => Some(mutation),
            Err(SubmitError::Closed | SubmitError::Invalid(_)) => None,
            Err(SubmitError::Draft(e)) => {
                let verb = match self.form.mode() {
                    Some(core_types::FormMode::Edit(_)) => "update",
                    _ => "create",
                };
                let label = self.form.draft().map(|d| d.label()).unwrap_or_default();
                let title = format!("Could not {verb} {label}");
                log::error!("{title}: {e}");
                self.push_toast(Toast::error(title));
                None
            }
        }
    }

    /// Ask for confirmation before deleting a record.
    pub fn request_delete(&mut self, record: R) {
        self.gate.open(record);
    }

    pub fn cancel_delete(&mut self) {
        self.gate.cancel();
    }

    /// Close the gate and return the delete to run, if one was pending.
    pub fn confirm_delete(&mut self) -> Option<Mutation> {
        self.gate.confirm()
    }

    /// Apply a finished mutation: toast and form effects.
    ///
    /// A success closes the form and begins the re-fetch, leaving the
    /// screen loading until `apply_fetch`. Returns whether the mutation
    /// succeeded, i.e. whether the caller must now fetch.
    pub fn apply_mutation(&mut self, mutation: &Mutation, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.push_toast(Toast::success(mutation.success_title()));
                self.form.close();
                self.begin_load();
                true
            }
            Err(e) => {
                log::error!("{}: {}", mutation.failure_title(), e);
                self.push_toast(Toast::error(mutation.failure_title()));
                false
            }
        }
    }
}

/// Owns a screen and a client and runs the full fetch/mutate cycle.
pub struct ScreenController<R, T> {
    client: ResourceClient<R, T>,
    screen: ResourceScreen<R>,
}

impl<R: Resource, T: Transport> ScreenController<R, T> {
    pub fn new(client: ResourceClient<R, T>) -> Self {
        Self {
            client,
            screen: ResourceScreen::new(),
        }
    }

    pub fn client(&self) -> &ResourceClient<R, T> {
        &self.client
    }

    pub fn screen(&self) -> &ResourceScreen<R> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut ResourceScreen<R> {
        &mut self.screen
    }

    /// Fetch the collection into the store.
    pub async fn load(&mut self) -> bool {
        self.screen.begin_load();
        let fetched = self.client.fetch().await;
        self.screen.apply_fetch(fetched)
    }

    /// Submit the open form. `None` when nothing was sent.
    pub async fn submit(&mut self) -> Option<bool> {
        let mutation = self.screen.submit_form()?;
        Some(self.run(mutation).await)
    }

    /// Confirm the pending delete. `None` when the gate was closed.
    pub async fn confirm_delete(&mut self) -> Option<bool> {
        let mutation = self.screen.confirm_delete()?;
        Some(self.run(mutation).await)
    }

    async fn run(&mut self, mutation: Mutation) -> bool {
        let result = self.client.mutate(&mutation).await;
        if !self.screen.apply_mutation(&mutation, result) {
            return false;
        }
        let fetched = self.client.fetch().await;
        self.screen.apply_fetch(fetched);
        true
    }
}
