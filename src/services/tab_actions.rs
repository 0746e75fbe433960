//! Row actions: switch to a tab, close a tab.
//!
//! Neither touches the cache. The host's own events report the result and
//! the event bridge picks it up.

use tracing::{debug, warn};

use crate::services::host::HostApi;
use crate::types::errors::HostError;
use crate::types::window::{Tab, TabId, WindowId};

/// Result of activating a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivateOutcome {
    /// The tab's window was focused because it is not the popup's window.
    pub focused_other_window: bool,
    /// The popup should close itself now.
    pub close_popup: bool,
    /// An `update active` command was sent for the tab.
    pub tab_activated: bool,
}

/// Brings `tab` (living in `parent_window`) to the front.
///
/// A tab in another window focuses that window first. Then, unless the tab
/// is already its window's active tab, it is activated.
pub async fn activate_tab<H: HostApi>(
    host: &H,
    tab: &Tab,
    parent_window: WindowId,
    close_popup_on_window_switch: bool,
) -> Result<ActivateOutcome, HostError> {
    let mut outcome = ActivateOutcome::default();

    let current = host.get_current_window(false).await?;
    if current.id != parent_window {
        host.focus_window(parent_window).await.map_err(|e| {
            warn!(window = %parent_window, error = %e, "failed to focus window");
            e
        })?;
        outcome.focused_other_window = true;
        outcome.close_popup = close_popup_on_window_switch;
    }

    if tab.active {
        return Ok(outcome);
    }

    host.activate_tab(tab.id).await.map_err(|e| {
        warn!(tab = %tab.id, error = %e, "failed to activate tab");
        e
    })?;
    outcome.tab_activated = true;
    debug!(tab = %tab.id, window = %parent_window, "tab activated");
    Ok(outcome)
}

/// Closes a tab. The cache follows once the host reports the removal.
pub async fn close_tab<H: HostApi>(host: &H, tab_id: TabId) -> Result<(), HostError> {
    host.remove_tab(tab_id).await.map_err(|e| {
        warn!(tab = %tab_id, error = %e, "failed to close tab");
        e
    })?;
    debug!(tab = %tab_id, "tab closed");
    Ok(())
}
