//! Tabdeck — the core of a tab switcher popup.
//!
//! Keeps a snapshot of every browser window and its tabs, reconciles it with
//! host events, applies drag-and-drop moves optimistically, and filters tabs
//! with fuzzy search. Rendering and the browser itself stay outside, behind
//! `PopupApp` and `services::host::HostApi`.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
