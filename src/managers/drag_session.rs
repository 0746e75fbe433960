use tracing::debug;

use crate::types::drag::{DragLocation, DragOutcome, DragResult};
use crate::types::window::TabId;

/// A drag gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub tab_id: TabId,
    pub source: DragLocation,
    /// Where the tab is currently hovering, if over a list.
    pub hover: Option<DragLocation>,
}

impl DragSession {
    /// What dropping at the current hover position would do.
    pub fn pending_outcome(&self) -> DragOutcome {
        DragOutcome::classify(self.source, self.hover)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Trait defining the drag session interface.
pub trait DragSessionTrait {
    fn begin_drag(&mut self, tab_id: TabId, source: DragLocation) -> bool;
    fn update_hover(&mut self, hover: Option<DragLocation>);
    fn end_drag(&mut self, destination: Option<DragLocation>) -> Option<DragResult>;
    fn cancel_drag(&mut self);
    fn state(&self) -> DragState;
    fn is_dragging(&self) -> bool;
    fn search_enabled(&self) -> bool;
}

/// Two-state machine for one drag gesture: `Idle -> Dragging -> Idle`.
///
/// Search input is disabled for as long as a drag is active, so list
/// positions on screen always equal positions in the cache.
#[derive(Debug, Default)]
pub struct DragSessionController {
    state: DragState,
}

impl DragSessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

impl DragSessionTrait for DragSessionController {
    /// Starts a drag. Ignored (returns false) while another drag is active.
    fn begin_drag(&mut self, tab_id: TabId, source: DragLocation) -> bool {
        if self.is_dragging() {
            debug!(tab = %tab_id, "begin_drag ignored, drag already active");
            return false;
        }
        self.state = DragState::Dragging(DragSession {
            tab_id,
            source,
            hover: Some(source),
        });
        debug!(tab = %tab_id, window = %source.window_id, index = source.index, "drag started");
        true
    }

    fn update_hover(&mut self, hover: Option<DragLocation>) {
        if let DragState::Dragging(session) = &mut self.state {
            session.hover = hover;
        }
    }

    /// Ends the drag and hands back the gesture. `None` if no drag was active.
    fn end_drag(&mut self, destination: Option<DragLocation>) -> Option<DragResult> {
        let session = match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => session,
            DragState::Idle => return None,
        };
        let result = DragResult {
            tab_id: session.tab_id,
            source: session.source,
            destination,
        };
        debug!(tab = %session.tab_id, outcome = ?result.outcome(), "drag ended");
        Some(result)
    }

    fn cancel_drag(&mut self) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            debug!(tab = %session.tab_id, "drag cancelled");
        }
    }

    fn state(&self) -> DragState {
        self.state
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    fn search_enabled(&self) -> bool {
        !self.is_dragging()
    }
}
