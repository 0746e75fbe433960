// Tabdeck platform paths
// Only the configuration directory is needed: the popup keeps no data or cache on disk.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Tabdeck.
///
/// - **Linux**: `$XDG_CONFIG_HOME/tabdeck`, else `~/.config/tabdeck`
/// - **macOS**: `~/Library/Application Support/Tabdeck`
/// - **Windows**: `%APPDATA%/Tabdeck`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}
