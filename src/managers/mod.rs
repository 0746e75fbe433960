// Tabdeck state managers
// Managers own synchronous popup state: the window cache, the drag gesture, keyboard focus.

pub mod drag_session;
pub mod focus_manager;
pub mod snapshot_cache;
