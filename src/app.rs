//! Popup core for Tabdeck.
//!
//! `PopupApp` lives exactly as long as the popup is open. It owns the host
//! listener, the snapshot cache and the drag/search/focus state, and exposes
//! the operations the view layer calls.

use tracing::{debug, info, warn};

use crate::managers::drag_session::{DragSessionController, DragSessionTrait};
use crate::managers::focus_manager::{FocusManager, FocusManagerTrait, NavKey};
use crate::managers::snapshot_cache::{Snapshot, SnapshotCache, SnapshotCacheTrait};
use crate::services::event_bridge::{refresh_all, HostEventBridge, Reconciliation};
use crate::services::host::{HostApi, HostEvent};
use crate::services::optimistic::{CommitReport, OptimisticEngine};
use crate::services::search::TabSearch;
use crate::services::tab_actions::{self, ActivateOutcome};
use crate::types::drag::{DragLocation, DragResult};
use crate::types::errors::{FetchError, HostError};
use crate::types::settings::PopupSettings;
use crate::types::window::{Tab, TabId, Window, WindowId};

/// One window section as the view layer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowView {
    pub id: WindowId,
    pub is_active_window: bool,
    pub tabs: Vec<Tab>,
}

/// Everything the view layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub active: Option<WindowView>,
    pub others: Vec<WindowView>,
    /// The last full fetch failed; offer a retry.
    pub error: bool,
    pub search_enabled: bool,
}

impl PopupView {
    /// Every visible tab in display order, with the window it belongs to.
    pub fn rows(&self) -> impl Iterator<Item = (WindowId, &Tab)> {
        self.active
            .iter()
            .chain(self.others.iter())
            .flat_map(|w| w.tabs.iter().map(move |t| (w.id, t)))
    }
}

/// The popup's state and behavior for one open session.
pub struct PopupApp<H: HostApi> {
    host: H,
    cache: SnapshotCache,
    bridge: HostEventBridge,
    engine: OptimisticEngine,
    drag: DragSessionController,
    focus: FocusManager,
    search: TabSearch,
    settings: PopupSettings,
    visible_rows: Vec<(WindowId, TabId)>,
    fetch_failed: bool,
}

impl<H: HostApi> PopupApp<H> {
    /// Opens a popup session: registers the host listener, then runs the
    /// initial fetch. A failed fetch leaves the error flag set.
    pub async fn mount(host: H, settings: PopupSettings) -> Self {
        let cache = SnapshotCache::new();
        let bridge = HostEventBridge::attach(&host, cache.clone());
        let mut app = Self {
            engine: OptimisticEngine::new(cache.clone()),
            focus: FocusManager::new(0, settings.behavior.wrap_keyboard_focus),
            search: TabSearch::new(settings.search.clone()),
            drag: DragSessionController::new(),
            visible_rows: Vec::new(),
            fetch_failed: false,
            host,
            cache,
            bridge,
            settings,
        };
        if let Err(e) = app.retry().await {
            warn!(error = %e, "initial fetch failed");
        }
        app
    }

    /// Closes the session. The host listener is released here.
    pub fn unmount(self) {
        info!("popup unmounted");
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn snapshot(&self) -> Snapshot {
        self.cache.get()
    }

    pub fn has_error(&self) -> bool {
        self.fetch_failed
    }

    /// Re-runs the full fetch. Clears the error flag on success.
    pub async fn retry(&mut self) -> Result<(), FetchError> {
        let result = refresh_all(&self.host, &self.cache).await;
        self.fetch_failed = result.is_err();
        result
    }

    // ─── Host events ───

    /// Reconciles the cache for one host event.
    pub async fn handle_event(&mut self, event: &HostEvent) -> Result<Reconciliation, FetchError> {
        let result = self.bridge.handle(&self.host, event).await;
        match &result {
            Ok(Reconciliation::FullRefresh) => self.fetch_failed = false,
            Ok(_) => {}
            Err(_) => self.fetch_failed = true,
        }
        result
    }

    /// Waits for the next host event and handles it. `None` once the host
    /// stops delivering events.
    pub async fn process_next_event(&mut self) -> Option<Result<Reconciliation, FetchError>> {
        let event = self.bridge.next_event().await?;
        Some(self.handle_event(&event).await)
    }

    /// Handles every event already queued, without waiting for more.
    pub async fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.bridge.poll_event() {
            let _ = self.handle_event(&event).await;
            handled += 1;
        }
        handled
    }

    // ─── Drag and drop ───

    pub fn begin_drag(&mut self, tab_id: TabId, source: DragLocation) -> bool {
        self.drag.begin_drag(tab_id, source)
    }

    pub fn update_drag_hover(&mut self, hover: Option<DragLocation>) {
        self.drag.update_hover(hover);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn search_enabled(&self) -> bool {
        self.drag.search_enabled()
    }

    /// Finishes the drag. A changed destination is committed through
    /// [`PopupApp::move_tab`]; anything else leaves the cache alone.
    pub async fn end_drag(&mut self, destination: Option<DragLocation>) -> Option<CommitReport> {
        let drag = self.drag.end_drag(destination)?;
        Some(self.move_tab(drag).await)
    }

    /// Applies a finished drag optimistically and sends the move to the host.
    pub async fn move_tab(&self, drag: DragResult) -> CommitReport {
        self.engine.commit(&self.host, drag).await
    }

    // ─── Row actions ───

    fn locate_tab(&self, tab_id: TabId) -> Result<(Tab, WindowId), HostError> {
        self.cache
            .get()
            .iter()
            .find_map(|w| {
                w.tabs
                    .iter()
                    .find(|t| t.id == tab_id)
                    .map(|t| (t.clone(), w.id))
            })
            .ok_or(HostError::TabNotFound(tab_id))
    }

    /// Switches the browser to `tab_id`.
    pub async fn activate_tab(&self, tab_id: TabId) -> Result<ActivateOutcome, HostError> {
        let (tab, window_id) = self.locate_tab(tab_id)?;
        tab_actions::activate_tab(
            &self.host,
            &tab,
            window_id,
            self.settings.behavior.close_popup_on_window_switch,
        )
        .await
    }

    pub async fn close_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        tab_actions::close_tab(&self.host, tab_id).await
    }

    // ─── View ───

    /// Builds the render model. While a drag is active the query is ignored
    /// so on-screen positions match cache positions.
    ///
    /// Windows without tabs are skipped. The cache can briefly hold one after
    /// its last tab was dragged out, until the host's refresh drops it.
    pub fn view(&mut self, query: &str) -> PopupView {
        let query = if self.drag.search_enabled() { query } else { "" };
        let snapshot = self.cache.get();

        let mut active = None;
        let mut others = Vec::new();
        for window in snapshot.iter().filter(|w| !w.tabs.is_empty()) {
            let section = self.window_view(window, query);
            if window.is_active_window && active.is_none() {
                active = Some(section);
            } else {
                others.push(section);
            }
        }

        let view = PopupView {
            active,
            others,
            error: self.fetch_failed,
            search_enabled: self.drag.search_enabled(),
        };
        self.visible_rows = view.rows().map(|(w, t)| (w, t.id)).collect();
        self.focus.set_row_count(self.visible_rows.len());
        view
    }

    fn window_view(&mut self, window: &Window, query: &str) -> WindowView {
        WindowView {
            id: window.id,
            is_active_window: window.is_active_window,
            tabs: self.search.filter(&window.tabs, query),
        }
    }

    /// Moves keyboard focus. `Enter` on a row returns the tab it shows,
    /// taken from the most recent [`PopupApp::view`].
    pub fn handle_key(&mut self, key: NavKey) -> Option<TabId> {
        let row = self.focus.handle_key(key)?;
        let tab = self.visible_rows.get(row).map(|(_, tab)| *tab);
        debug!(row, ?tab, "row selected from keyboard");
        tab
    }

    pub fn focus(&self) -> crate::managers::focus_manager::Focus {
        self.focus.focus()
    }
}
