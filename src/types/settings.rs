use serde::{Deserialize, Serialize};

/// Top-level popup settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PopupSettings {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub behavior: BehaviorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSettings {
    /// 0.0 keeps only the strongest matches, 1.0 keeps any fuzzy match.
    pub threshold: f64,
    pub match_title: bool,
    pub match_url: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            match_title: true,
            match_url: true,
        }
    }
}

/// Popup interaction behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BehaviorSettings {
    /// Close the popup after activating a tab that lives in another window.
    pub close_popup_on_window_switch: bool,
    /// Wrap keyboard focus from the last row back to the first.
    pub wrap_keyboard_focus: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            close_popup_on_window_switch: true,
            wrap_keyboard_focus: true,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
