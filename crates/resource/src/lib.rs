//! Resource list screen for the Simplify console.
//!
//! This crate provides:
//! - Transport: the seam over which requests reach the backend
//! - ResourceClient: Fetcher and Mutator for one collection endpoint
//! - ResourceScreen: store, form panel, confirmation gate and toasts
//! - ScreenController: drives a screen against a client
//! - session: login and logout against the backend session

mod client;
mod cookie;
mod form;
mod gate;
mod screen;
pub mod session;
mod store;
mod toast;
mod transport;

use core_types::ResourceId;
use thiserror::Error;

pub use client::{Mutation, ResourceClient};
pub use cookie::{CSRF_COOKIE, CSRF_HEADER, CookieJar};
pub use form::{FormPanel, SubmitError};
pub use gate::ConfirmationGate;
pub use screen::{ResourceScreen, ScreenController};
pub use store::ResourceStore;
pub use toast::{TOAST_DURATION_MS, Toast, ToastStatus};
pub use transport::{ApiRequest, ApiResponse, CONTENT_TYPE, JSON_CONTENT_TYPE, Method, Transport};

/// Errors from talking to the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate record id in response: {0}")]
    DuplicateId(ResourceId),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
