//! Reusable UI components.

mod confirm_dialog;
mod loading;
mod navbar;
mod resource_form;
mod toast_stack;

pub use confirm_dialog::ConfirmDialog;
pub use loading::Loading;
pub use navbar::Navbar;
pub use resource_form::ResourceForm;
pub use toast_stack::ToastStack;
