use thiserror::Error;

use super::window::{TabId, WindowId};

// === HostError ===

/// Errors returned by the host tab/window API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The window no longer exists (closed concurrently, or never existed).
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),
    /// The tab no longer exists.
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),
    /// The host API could not be reached.
    #[error("Host unavailable: {0}")]
    Unavailable(String),
    /// The host refused the command.
    #[error("Host rejected command: {0}")]
    Rejected(String),
}

// === FetchError ===

/// A full or single-window refresh against the host failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Failed to fetch windows: {0}")]
    Windows(#[source] HostError),
    #[error("Failed to fetch current window: {0}")]
    CurrentWindow(#[source] HostError),
}

// === MutationError ===

/// Errors raised while computing an optimistic cache patch.
///
/// None of these leave a partial mutation behind; callers discard the
/// attempt and wait for the next authoritative refresh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// The window being reordered is not in the cache.
    #[error("Window could not be found for optimistic reorder.")]
    ReorderTargetMissing(WindowId),
    /// Source or destination window is not in the cache.
    #[error("Source or destination windows could not be found for optimistic move between windows.")]
    MoveTargetMissing {
        from_window: WindowId,
        to_window: WindowId,
    },
    /// The index does not address a slot in the window's tab list.
    #[error("Tab index {index} out of range for window {window_id}")]
    IndexOutOfRange { window_id: WindowId, index: usize },
}

impl MutationError {
    /// True for the "stale view" family: the patch referenced a window the
    /// cache no longer holds.
    pub fn is_target_missing(&self) -> bool {
        matches!(
            self,
            MutationError::ReorderTargetMissing(_) | MutationError::MoveTargetMissing { .. }
        )
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
