use std::sync::Arc;

use tokio::sync::watch;

use crate::types::window::{partition_windows, Window, WindowId};

/// An immutable, complete view of every cached window.
pub type Snapshot = Arc<Vec<Window>>;

/// Trait defining the snapshot cache interface.
pub trait SnapshotCacheTrait {
    fn get(&self) -> Snapshot;
    fn replace(&self, windows: Vec<Window>);
    fn apply_patch<F>(&self, patch: F)
    where
        F: FnOnce(&[Window]) -> Vec<Window>;
    fn try_apply_patch<F, E>(&self, patch: F) -> Result<(), E>
    where
        F: FnOnce(&[Window]) -> Result<Vec<Window>, E>;
    fn subscribe(&self) -> watch::Receiver<Snapshot>;
}

/// Last known authoritative state of every browser window.
///
/// Backed by a `watch` channel: a patch swaps in a whole new snapshot, so
/// readers only ever see complete lists and never wait on a refresh in
/// flight. Clones share the same underlying state.
#[derive(Clone)]
pub struct SnapshotCache {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx: Arc::new(tx) }
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.tx.borrow().iter().any(|w| w.id == window_id)
    }

    pub fn window(&self, window_id: WindowId) -> Option<Window> {
        self.tx.borrow().iter().find(|w| w.id == window_id).cloned()
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.tx
            .borrow()
            .iter()
            .find(|w| w.is_active_window)
            .map(|w| w.id)
    }

    /// (active window, other windows), each cloned out of the current snapshot.
    pub fn partitioned(&self) -> (Option<Window>, Vec<Window>) {
        let snapshot = self.get();
        let (active, others) = partition_windows(&snapshot);
        (active.cloned(), others.into_iter().cloned().collect())
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCacheTrait for SnapshotCache {
    fn get(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Full authoritative refresh.
    fn replace(&self, windows: Vec<Window>) {
        self.tx.send_replace(Arc::new(windows));
    }

    fn apply_patch<F>(&self, patch: F)
    where
        F: FnOnce(&[Window]) -> Vec<Window>,
    {
        self.tx.send_modify(|snapshot| {
            let next = patch(snapshot.as_slice());
            *snapshot = Arc::new(next);
        });
    }

    /// Applies `patch` only if it succeeds; on error the snapshot is left
    /// untouched and receivers are not notified.
    fn try_apply_patch<F, E>(&self, patch: F) -> Result<(), E>
    where
        F: FnOnce(&[Window]) -> Result<Vec<Window>, E>,
    {
        let mut outcome = Ok(());
        self.tx.send_if_modified(|snapshot| match patch(snapshot.as_slice()) {
            Ok(next) => {
                *snapshot = Arc::new(next);
                true
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        outcome
    }

    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}
