//! Transient notifications.

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

/// A notification shown after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Assigned by the screen when queued
    pub id: u64,
    pub title: String,
    pub status: ToastStatus,
    pub duration_ms: u32,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self::with_status(title, ToastStatus::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::with_status(title, ToastStatus::Error)
    }

    fn with_status(title: impl Into<String>, status: ToastStatus) -> Self {
        Self {
            id: 0,
            title: title.into(),
            status,
            duration_ms: TOAST_DURATION_MS,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ToastStatus::Error
    }
}
