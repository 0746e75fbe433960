// Tabdeck services
// Services talk to the host or compute over cache state: events, optimistic moves, search, settings.

pub mod event_bridge;
pub mod host;
pub mod memory_host;
pub mod optimistic;
pub mod search;
pub mod settings_engine;
pub mod tab_actions;
