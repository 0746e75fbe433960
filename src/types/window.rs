use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-assigned window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

/// Host-assigned tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A browser tab as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    /// Mirrored from the host, never enforced locally.
    pub active: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub audible: bool,
    #[serde(default)]
    pub muted: bool,
}

impl Tab {
    pub fn new(id: TabId, title: &str, url: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            url: url.to_string(),
            fav_icon_url: None,
            active: false,
            pinned: false,
            audible: false,
            muted: false,
        }
    }
}

/// A host window together with its ordered tabs.
///
/// `is_active_window` marks the window the popup was opened from. The host
/// itself has no such flag; it is assigned when the cache is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    #[serde(default)]
    pub is_active_window: bool,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

impl Window {
    pub fn new(id: WindowId, tabs: Vec<Tab>) -> Self {
        Self {
            id,
            is_active_window: false,
            tabs,
        }
    }

    pub fn with_active_flag(mut self, active: bool) -> Self {
        self.is_active_window = active;
        self
    }

    pub fn tab_index(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }
}

/// Splits `items` into (matching, non-matching), both in input order.
pub fn group_by<T, F>(items: Vec<T>, mut pred: F) -> (Vec<T>, Vec<T>)
where
    F: FnMut(&T) -> bool,
{
    items.into_iter().partition(|item| pred(item))
}

/// Splits a cache snapshot into the active window and every other window.
pub fn partition_windows(windows: &[Window]) -> (Option<&Window>, Vec<&Window>) {
    let (active, others) = group_by(windows.iter().collect(), |w: &&Window| w.is_active_window);
    (active.into_iter().next(), others)
}
