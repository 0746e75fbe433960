//! Optimistic drag-and-drop mutations.
//!
//! A drop is applied to the cache immediately, then the real move is sent
//! to the host. The host's confirming event later triggers an authoritative
//! refresh which overwrites whatever was guessed here.
//!
//! Indices are destination-relative after removal: dropping at `i` means the
//! tab ends up at position `i` of the final list.

use tracing::{debug, info, warn};

use crate::managers::snapshot_cache::{SnapshotCache, SnapshotCacheTrait};
use crate::services::host::{HostApi, MoveProperties};
use crate::types::drag::{DragOutcome, DragResult};
use crate::types::errors::{HostError, MutationError};
use crate::types::window::{Window, WindowId};

/// Moves the tab at `from` to `to` inside one window.
pub fn reorder_within_window(
    windows: &[Window],
    window_id: WindowId,
    from: usize,
    to: usize,
) -> Result<Vec<Window>, MutationError> {
    let pos = windows
        .iter()
        .position(|w| w.id == window_id)
        .ok_or(MutationError::ReorderTargetMissing(window_id))?;

    if from == to {
        return Ok(windows.to_vec());
    }

    let mut next = windows.to_vec();
    let tabs = &mut next[pos].tabs;
    if from >= tabs.len() {
        return Err(MutationError::IndexOutOfRange { window_id, index: from });
    }
    let tab = tabs.remove(from);
    if to > tabs.len() {
        return Err(MutationError::IndexOutOfRange { window_id, index: to });
    }
    tabs.insert(to, tab);
    Ok(next)
}

/// Moves the tab at `from` in `source` to position `to` in `destination`.
pub fn move_between_windows(
    windows: &[Window],
    source: WindowId,
    destination: WindowId,
    from: usize,
    to: usize,
) -> Result<Vec<Window>, MutationError> {
    let missing = MutationError::MoveTargetMissing {
        from_window: source,
        to_window: destination,
    };
    let src_pos = windows.iter().position(|w| w.id == source).ok_or(missing.clone())?;
    let dst_pos = windows.iter().position(|w| w.id == destination).ok_or(missing)?;

    if src_pos == dst_pos {
        return reorder_within_window(windows, source, from, to);
    }

    let mut next = windows.to_vec();
    if from >= next[src_pos].tabs.len() {
        return Err(MutationError::IndexOutOfRange {
            window_id: source,
            index: from,
        });
    }
    if to > next[dst_pos].tabs.len() {
        return Err(MutationError::IndexOutOfRange {
            window_id: destination,
            index: to,
        });
    }
    let tab = next[src_pos].tabs.remove(from);
    next[dst_pos].tabs.insert(to, tab);
    Ok(next)
}

/// Dispatches a classified drop to the matching mutation.
pub fn apply_outcome(windows: &[Window], outcome: DragOutcome) -> Result<Vec<Window>, MutationError> {
    match outcome {
        DragOutcome::Reorder { window_id, from, to } => {
            reorder_within_window(windows, window_id, from, to)
        }
        DragOutcome::CrossWindowMove {
            from_window,
            to_window,
            from,
            to,
        } => move_between_windows(windows, from_window, to_window, from, to),
        DragOutcome::NoOp => Ok(windows.to_vec()),
    }
}

/// What happened to one committed drop.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReport {
    pub outcome: DragOutcome,
    /// The optimistic patch was applied to the cache.
    pub patched: bool,
    /// Set when the optimistic patch was discarded.
    pub discarded: Option<MutationError>,
    /// Set when the host rejected the move. Never retried.
    pub host_failure: Option<HostError>,
}

impl CommitReport {
    fn noop() -> Self {
        Self {
            outcome: DragOutcome::NoOp,
            patched: false,
            discarded: None,
            host_failure: None,
        }
    }
}

/// Applies drops to the cache and forwards them to the host.
pub struct OptimisticEngine {
    cache: SnapshotCache,
}

impl OptimisticEngine {
    pub fn new(cache: SnapshotCache) -> Self {
        Self { cache }
    }

    /// Patches the cache for `drag` without awaiting anything.
    ///
    /// Returns the classified outcome, or the mutation error if the patch
    /// had to be discarded. A discarded patch leaves the cache untouched.
    pub fn apply_local(&self, drag: &DragResult) -> Result<DragOutcome, MutationError> {
        let outcome = drag.outcome();
        if outcome == DragOutcome::NoOp {
            return Ok(outcome);
        }
        self.cache
            .try_apply_patch(|windows| apply_outcome(windows, outcome))?;
        debug!(tab = %drag.tab_id, ?outcome, "optimistic patch applied");
        Ok(outcome)
    }

    /// Applies the optimistic patch, then issues the host move.
    ///
    /// The host command is sent even when the local patch was discarded:
    /// the drag layer saw a valid drop, and the host is the one that decides.
    pub async fn commit<H: HostApi>(&self, host: &H, drag: DragResult) -> CommitReport {
        let outcome = drag.outcome();
        let target = match outcome.host_target() {
            Some(target) => target,
            None => return CommitReport::noop(),
        };

        let (patched, discarded) = match self.apply_local(&drag) {
            Ok(_) => (true, None),
            Err(e) => {
                warn!(tab = %drag.tab_id, error = %e, "discarding optimistic patch");
                (false, Some(e))
            }
        };

        let props = MoveProperties {
            window_id: target.window_id,
            index: target.index,
        };
        let host_failure = match host.move_tab(drag.tab_id, props).await {
            Ok(()) => {
                info!(tab = %drag.tab_id, window = %props.window_id, index = props.index, "tab moved");
                None
            }
            Err(e) => {
                warn!(tab = %drag.tab_id, error = %e, "host rejected tab move");
                Some(e)
            }
        };

        CommitReport {
            outcome,
            patched,
            discarded,
            host_failure,
        }
    }
}
