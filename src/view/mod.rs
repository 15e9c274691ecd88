//! View seam: observers the store notifies after state changes.
//!
//! The store never touches a rendering surface itself. Mutations go through
//! pure state updates, then observers get exactly one `state_changed` per
//! logical operation, plus transient `notice`s for user feedback.

use crate::models::AlbumState;

/// Severity of a transient user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Collaborator that projects store state to a user-visible surface.
pub trait AlbumObserver: Send + Sync {
    /// Called after every mutation that changes what should be visible.
    fn state_changed(&self, state: &AlbumState);

    /// Called for transient notifications (success toasts, skipped files,
    /// storage faults).
    fn notice(&self, notice: &Notice);
}
