//! Boundary to the browser's tab/window API.
//!
//! The core never talks to the browser directly; it goes through
//! [`HostApi`]. Every call is asynchronous and may fail with a
//! [`HostError`]. Host lifecycle events are delivered through an
//! [`EventSubscription`], which unregisters its listener when dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::errors::HostError;
use crate::types::window::{TabId, Window, WindowId};

/// Target of a `moveTab` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProperties {
    pub window_id: WindowId,
    pub index: usize,
}

/// Lifecycle events the popup listens to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    /// A tab changed position inside a window.
    #[serde(rename_all = "camelCase")]
    TabMoved {
        tab_id: TabId,
        window_id: WindowId,
        from_index: usize,
        to_index: usize,
    },
    /// A tab was attached to a (possibly new) window.
    #[serde(rename_all = "camelCase")]
    TabAttached {
        tab_id: TabId,
        new_window_id: WindowId,
        new_position: usize,
    },
    /// A tab was closed.
    #[serde(rename_all = "camelCase")]
    TabRemoved {
        tab_id: TabId,
        window_id: WindowId,
        is_window_closing: bool,
    },
}

/// Releases a host listener. Called exactly once, when the subscription drops.
pub type ReleaseFn = Box<dyn FnOnce(Uuid) + Send>;

/// A registered host event listener.
///
/// Holding the value keeps the listener alive; dropping it unregisters it,
/// whichever way the popup session ends.
pub struct EventSubscription {
    id: Uuid,
    events: mpsc::UnboundedReceiver<HostEvent>,
    release: Option<ReleaseFn>,
}

impl EventSubscription {
    pub fn new(id: Uuid, events: mpsc::UnboundedReceiver<HostEvent>, release: ReleaseFn) -> Self {
        Self {
            id,
            events,
            release: Some(release),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the next event. `None` once the host side has gone away.
    pub async fn recv(&mut self) -> Option<HostEvent> {
        self.events.recv().await
    }

    /// Returns an already-queued event without waiting.
    pub fn try_recv(&mut self) -> Option<HostEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

/// The browser extension platform's tab/window interface.
#[allow(async_fn_in_trait)]
pub trait HostApi {
    async fn get_current_window(&self, populate_tabs: bool) -> Result<Window, HostError>;
    async fn get_all_windows(&self, populate_tabs: bool) -> Result<Vec<Window>, HostError>;
    /// Fails with [`HostError::WindowNotFound`] once the window is gone.
    async fn get_window(&self, window_id: WindowId, populate_tabs: bool)
        -> Result<Window, HostError>;
    async fn move_tab(&self, tab_id: TabId, props: MoveProperties) -> Result<(), HostError>;
    async fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError>;
    async fn focus_window(&self, window_id: WindowId) -> Result<(), HostError>;
    async fn remove_tab(&self, tab_id: TabId) -> Result<(), HostError>;
    fn subscribe(&self) -> EventSubscription;
}
