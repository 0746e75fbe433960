use serde::{Deserialize, Serialize};

use super::window::{TabId, WindowId};

/// A position in a window's tab list, as reported by the drag layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub window_id: WindowId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(window_id: WindowId, index: usize) -> Self {
        Self { window_id, index }
    }
}

/// The finished gesture handed to the core by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub tab_id: TabId,
    pub source: DragLocation,
    /// `None` when the tab was dropped outside every list.
    pub destination: Option<DragLocation>,
}

/// What a drop means for the cache. Derived once per drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Reorder {
        window_id: WindowId,
        from: usize,
        to: usize,
    },
    CrossWindowMove {
        from_window: WindowId,
        to_window: WindowId,
        from: usize,
        to: usize,
    },
    NoOp,
}

impl DragOutcome {
    pub fn classify(source: DragLocation, destination: Option<DragLocation>) -> Self {
        match destination {
            None => DragOutcome::NoOp,
            Some(dest) if dest == source => DragOutcome::NoOp,
            Some(dest) if dest.window_id == source.window_id => DragOutcome::Reorder {
                window_id: source.window_id,
                from: source.index,
                to: dest.index,
            },
            Some(dest) => DragOutcome::CrossWindowMove {
                from_window: source.window_id,
                to_window: dest.window_id,
                from: source.index,
                to: dest.index,
            },
        }
    }

    /// Window and index the host command should target, if any.
    pub fn host_target(&self) -> Option<DragLocation> {
        match *self {
            DragOutcome::Reorder { window_id, to, .. } => Some(DragLocation::new(window_id, to)),
            DragOutcome::CrossWindowMove { to_window, to, .. } => {
                Some(DragLocation::new(to_window, to))
            }
            DragOutcome::NoOp => None,
        }
    }
}

impl DragResult {
    pub fn outcome(&self) -> DragOutcome {
        DragOutcome::classify(self.source, self.destination)
    }
}
