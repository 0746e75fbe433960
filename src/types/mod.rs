// Tabdeck shared type definitions
// Each submodule defines types used across the popup core.

pub mod drag;
pub mod errors;
pub mod settings;
pub mod window;
