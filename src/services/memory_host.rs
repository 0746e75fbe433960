//! In-process stand-in for the browser's tab/window API.
//!
//! Behaves like the real host where the popup can observe it: moves emit
//! `TabMoved` or `TabAttached`, removals emit `TabRemoved`, a window whose
//! last tab leaves is closed, and each window keeps exactly one active tab.
//! Fetches and commands can be made to fail on demand.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::services::host::{EventSubscription, HostApi, HostEvent, MoveProperties};
use crate::types::errors::HostError;
use crate::types::window::{Tab, TabId, Window, WindowId};

/// A command the host accepted, in the order it was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    MoveTab { tab_id: TabId, props: MoveProperties },
    ActivateTab(TabId),
    FocusWindow(WindowId),
    RemoveTab(TabId),
}

#[derive(Default)]
struct HostState {
    windows: Vec<Window>,
    current: Option<WindowId>,
    focused: Option<WindowId>,
    listeners: HashMap<Uuid, mpsc::UnboundedSender<HostEvent>>,
    next_window_id: i64,
    next_tab_id: i64,
    fail_fetches: bool,
    fail_commands: bool,
    commands: Vec<HostCommand>,
}

impl HostState {
    fn window(&self, id: WindowId) -> Result<&Window, HostError> {
        self.windows
            .iter()
            .find(|w| w.id == id)
            .ok_or(HostError::WindowNotFound(id))
    }

    fn window_pos(&self, id: WindowId) -> Result<usize, HostError> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(HostError::WindowNotFound(id))
    }

    /// (window position, tab position) of a tab.
    fn locate(&self, tab_id: TabId) -> Result<(usize, usize), HostError> {
        self.windows
            .iter()
            .enumerate()
            .find_map(|(wi, w)| w.tab_index(tab_id).map(|ti| (wi, ti)))
            .ok_or(HostError::TabNotFound(tab_id))
    }

    fn check_fetch(&self) -> Result<(), HostError> {
        if self.fail_fetches {
            return Err(HostError::Unavailable("fetch failure injected".to_string()));
        }
        Ok(())
    }

    fn check_command(&self) -> Result<(), HostError> {
        if self.fail_commands {
            return Err(HostError::Rejected("command failure injected".to_string()));
        }
        Ok(())
    }

    fn emit(&mut self, event: HostEvent) {
        self.listeners.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    /// Keeps one active tab after the active one left position `removed_at`.
    fn reactivate_neighbor(window: &mut Window, removed_at: usize) {
        if window.tabs.is_empty() || window.tabs.iter().any(|t| t.active) {
            return;
        }
        let idx = removed_at.min(window.tabs.len() - 1);
        window.tabs[idx].active = true;
    }

    /// Drops the window at `pos` if it has no tabs left. Returns true if closed.
    /// The first remaining window becomes current, like a browser refocusing.
    fn close_if_empty(&mut self, pos: usize) -> bool {
        if !self.windows[pos].tabs.is_empty() {
            return false;
        }
        let id = self.windows.remove(pos).id;
        let next = self.windows.first().map(|w| w.id);
        if self.current == Some(id) {
            self.current = next;
        }
        if self.focused == Some(id) {
            self.focused = next;
        }
        true
    }
}

fn snapshot(window: &Window, populate_tabs: bool) -> Window {
    let mut out = window.clone();
    out.is_active_window = false;
    if !populate_tabs {
        out.tabs.clear();
    }
    out
}

/// Shared handle to an in-memory browser. Clones see the same state.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a window with `(title, url)` tabs. The first tab is active.
    /// The first window opened becomes the current window.
    pub fn open_window(&self, tabs: &[(&str, &str)]) -> WindowId {
        let mut state = self.lock();
        state.next_window_id += 1;
        let id = WindowId(state.next_window_id);
        let mut window = Window::new(id, Vec::with_capacity(tabs.len()));
        for (i, (title, url)) in tabs.iter().enumerate() {
            state.next_tab_id += 1;
            let mut tab = Tab::new(TabId(state.next_tab_id), title, url);
            tab.active = i == 0;
            window.tabs.push(tab);
        }
        state.windows.push(window);
        if state.current.is_none() {
            state.current = Some(id);
            state.focused = Some(id);
        }
        id
    }

    /// Appends a tab to a window. Tab creation is not an event the popup
    /// listens to.
    pub fn open_tab(&self, window_id: WindowId, title: &str, url: &str) -> Result<TabId, HostError> {
        let mut state = self.lock();
        let pos = state.window_pos(window_id)?;
        state.next_tab_id += 1;
        let tab_id = TabId(state.next_tab_id);
        let mut tab = Tab::new(tab_id, title, url);
        tab.active = state.windows[pos].tabs.is_empty();
        state.windows[pos].tabs.push(tab);
        Ok(tab_id)
    }

    pub fn set_current_window(&self, window_id: WindowId) {
        self.lock().current = Some(window_id);
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.lock().focused
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.lock().fail_fetches = fail;
    }

    pub fn set_fail_commands(&self, fail: bool) {
        self.lock().fail_commands = fail;
    }

    /// Current host state, without the popup's active-window flag.
    pub fn windows(&self) -> Vec<Window> {
        self.lock().windows.iter().map(|w| snapshot(w, true)).collect()
    }

    pub fn commands(&self) -> Vec<HostCommand> {
        self.lock().commands.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Delivers `event` to every listener without changing host state.
    pub fn emit(&self, event: HostEvent) {
        self.lock().emit(event);
    }
}

impl HostApi for MemoryHost {
    async fn get_current_window(&self, populate_tabs: bool) -> Result<Window, HostError> {
        let state = self.lock();
        state.check_fetch()?;
        let id = state
            .current
            .ok_or_else(|| HostError::Unavailable("no current window".to_string()))?;
        Ok(snapshot(state.window(id)?, populate_tabs))
    }

    async fn get_all_windows(&self, populate_tabs: bool) -> Result<Vec<Window>, HostError> {
        let state = self.lock();
        state.check_fetch()?;
        Ok(state
            .windows
            .iter()
            .map(|w| snapshot(w, populate_tabs))
            .collect())
    }

    async fn get_window(&self, window_id: WindowId, populate_tabs: bool) -> Result<Window, HostError> {
        let state = self.lock();
        state.check_fetch()?;
        Ok(snapshot(state.window(window_id)?, populate_tabs))
    }

    async fn move_tab(&self, tab_id: TabId, props: MoveProperties) -> Result<(), HostError> {
        let mut state = self.lock();
        state.check_command()?;
        let (src, from) = state.locate(tab_id)?;
        let dst = state.window_pos(props.window_id)?;
        state.commands.push(HostCommand::MoveTab { tab_id, props });

        if src == dst {
            let tabs = &mut state.windows[src].tabs;
            let tab = tabs.remove(from);
            let to = props.index.min(tabs.len());
            tabs.insert(to, tab);
            if from != to {
                state.emit(HostEvent::TabMoved {
                    tab_id,
                    window_id: props.window_id,
                    from_index: from,
                    to_index: to,
                });
            }
            return Ok(());
        }

        let mut tab = state.windows[src].tabs.remove(from);
        let was_active = tab.active;
        tab.active = false;
        if was_active {
            HostState::reactivate_neighbor(&mut state.windows[src], from);
        }
        let tabs = &mut state.windows[dst].tabs;
        let to = props.index.min(tabs.len());
        tabs.insert(to, tab);
        state.close_if_empty(src);
        state.emit(HostEvent::TabAttached {
            tab_id,
            new_window_id: props.window_id,
            new_position: to,
        });
        Ok(())
    }

    async fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        let mut state = self.lock();
        state.check_command()?;
        let (wi, ti) = state.locate(tab_id)?;
        for (i, tab) in state.windows[wi].tabs.iter_mut().enumerate() {
            tab.active = i == ti;
        }
        state.commands.push(HostCommand::ActivateTab(tab_id));
        Ok(())
    }

    async fn focus_window(&self, window_id: WindowId) -> Result<(), HostError> {
        let mut state = self.lock();
        state.check_command()?;
        state.window_pos(window_id)?;
        state.focused = Some(window_id);
        state.commands.push(HostCommand::FocusWindow(window_id));
        Ok(())
    }

    async fn remove_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        let mut state = self.lock();
        state.check_command()?;
        let (wi, ti) = state.locate(tab_id)?;
        let window_id = state.windows[wi].id;
        let removed = state.windows[wi].tabs.remove(ti);
        if removed.active {
            HostState::reactivate_neighbor(&mut state.windows[wi], ti);
        }
        let is_window_closing = state.close_if_empty(wi);
        state.commands.push(HostCommand::RemoveTab(tab_id));
        state.emit(HostEvent::TabRemoved {
            tab_id,
            window_id,
            is_window_closing,
        });
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.lock().listeners.insert(id, tx);

        let weak: Weak<Mutex<HostState>> = Arc::downgrade(&self.state);
        EventSubscription::new(
            id,
            rx,
            Box::new(move |id| {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.lock().unwrap_or_else(|p| p.into_inner());
                    state.listeners.remove(&id);
                }
            }),
        )
    }
}
