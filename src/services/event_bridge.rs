//! Turns host lifecycle events into cache refreshes.
//!
//! Every refresh is authoritative for the windows it touches and overwrites
//! them wholesale, so handling converges no matter how events interleave
//! with optimistic patches or how often one event is delivered.

use tracing::{debug, info, warn};

use crate::managers::snapshot_cache::{SnapshotCache, SnapshotCacheTrait};
use crate::services::host::{EventSubscription, HostApi, HostEvent};
use crate::types::errors::FetchError;
use crate::types::window::{Window, WindowId};

/// How the cache was reconciled for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The whole cache was re-fetched.
    FullRefresh,
    /// One window's entry was replaced with fresh host state.
    WindowReplaced(WindowId),
    /// The window is gone (no tabs left, or the host no longer knows it).
    WindowRemoved(WindowId),
}

/// Fetches every window and flags the current one as active.
///
/// The current window comes first, the rest follow in host order. Windows
/// without tabs are dropped, the current one included; in that case the
/// first remaining window takes the active flag.
pub async fn fetch_all<H: HostApi>(host: &H) -> Result<Vec<Window>, FetchError> {
    let current = host
        .get_current_window(true)
        .await
        .map_err(FetchError::CurrentWindow)?;
    let all = host.get_all_windows(true).await.map_err(FetchError::Windows)?;

    let current_id = current.id;
    let mut windows = Vec::with_capacity(all.len().max(1));
    if !current.tabs.is_empty() {
        windows.push(current);
    }
    windows.extend(
        all.into_iter()
            .filter(|w| w.id != current_id && !w.tabs.is_empty()),
    );
    Ok(windows
        .into_iter()
        .enumerate()
        .map(|(i, w)| w.with_active_flag(i == 0))
        .collect())
}

/// Runs a full fetch and swaps the result into the cache.
///
/// On failure the cache keeps its last complete snapshot.
pub async fn refresh_all<H: HostApi>(host: &H, cache: &SnapshotCache) -> Result<(), FetchError> {
    match fetch_all(host).await {
        Ok(windows) => {
            debug!(windows = windows.len(), "cache refreshed");
            cache.replace(windows);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "full refresh failed");
            Err(e)
        }
    }
}

/// Listens to host events for the lifetime of the popup.
pub struct HostEventBridge {
    subscription: EventSubscription,
    cache: SnapshotCache,
}

impl HostEventBridge {
    /// Registers the listener. It is released when the bridge is dropped.
    pub fn attach<H: HostApi>(host: &H, cache: SnapshotCache) -> Self {
        let subscription = host.subscribe();
        info!(listener = %subscription.id(), "host listener attached");
        Self {
            subscription,
            cache,
        }
    }

    /// Waits for the next host event.
    pub async fn next_event(&mut self) -> Option<HostEvent> {
        self.subscription.recv().await
    }

    /// Returns a queued event if one is ready.
    pub fn poll_event(&mut self) -> Option<HostEvent> {
        self.subscription.try_recv()
    }

    /// Reconciles the cache with host state for one event.
    pub async fn handle<H: HostApi>(
        &self,
        host: &H,
        event: &HostEvent,
    ) -> Result<Reconciliation, FetchError> {
        debug!(?event, "host event");
        match *event {
            HostEvent::TabMoved { .. } | HostEvent::TabAttached { .. } => {
                refresh_all(host, &self.cache).await?;
                Ok(Reconciliation::FullRefresh)
            }
            HostEvent::TabRemoved { window_id, .. } => self.refresh_window(host, window_id).await,
        }
    }

    /// Re-fetches one window after a tab was removed from it.
    ///
    /// A failed lookup means the window is gone. Losing the active window
    /// escalates to a full refresh so the host decides which window is
    /// current now. Until it succeeds the first remaining window holds the
    /// active flag.
    async fn refresh_window<H: HostApi>(
        &self,
        host: &H,
        window_id: WindowId,
    ) -> Result<Reconciliation, FetchError> {
        let refreshed = match host.get_window(window_id, true).await {
            Ok(window) if !window.tabs.is_empty() => Some(window),
            Ok(_) => None,
            Err(e) => {
                debug!(window = %window_id, error = %e, "window lookup failed, treating as closed");
                None
            }
        };

        match refreshed {
            Some(window) => {
                self.cache.apply_patch(|windows| replace_window(windows, window));
                Ok(Reconciliation::WindowReplaced(window_id))
            }
            None => {
                let was_active = self.cache.active_window_id() == Some(window_id);
                self.cache.apply_patch(|windows| {
                    let mut next = remove_window(windows, window_id);
                    // Stand-in until the refresh below reports the real current window.
                    if was_active {
                        if let Some(first) = next.first_mut() {
                            first.is_active_window = true;
                        }
                    }
                    next
                });
                if was_active && !self.cache.is_empty() {
                    refresh_all(host, &self.cache).await?;
                    return Ok(Reconciliation::FullRefresh);
                }
                Ok(Reconciliation::WindowRemoved(window_id))
            }
        }
    }
}

/// Swaps in `fresh` for the entry with the same id, keeping that entry's
/// active flag. Windows the cache does not know are left out.
pub fn replace_window(windows: &[Window], fresh: Window) -> Vec<Window> {
    windows
        .iter()
        .map(|w| {
            if w.id == fresh.id {
                fresh.clone().with_active_flag(w.is_active_window)
            } else {
                w.clone()
            }
        })
        .collect()
}

pub fn remove_window(windows: &[Window], window_id: WindowId) -> Vec<Window> {
    windows.iter().filter(|w| w.id != window_id).cloned().collect()
}
