use tabdeck::types::errors::*;
use tabdeck::types::window::{TabId, WindowId};

// === MutationError Tests ===

#[test]
fn reorder_target_missing_display() {
    let err = MutationError::ReorderTargetMissing(WindowId(888));
    assert_eq!(err.to_string(), "Window could not be found for optimistic reorder.");
    assert!(err.is_target_missing());
}

#[test]
fn move_target_missing_display() {
    let err = MutationError::MoveTargetMissing {
        from_window: WindowId(999),
        to_window: WindowId(888),
    };
    assert_eq!(
        err.to_string(),
        "Source or destination windows could not be found for optimistic move between windows."
    );
    assert!(err.is_target_missing());
}

#[test]
fn index_out_of_range_display() {
    let err = MutationError::IndexOutOfRange {
        window_id: WindowId(1),
        index: 7,
    };
    assert_eq!(err.to_string(), "Tab index 7 out of range for window 1");
    assert!(!err.is_target_missing());
}

// === HostError Tests ===

#[test]
fn host_error_display_variants() {
    assert_eq!(HostError::WindowNotFound(WindowId(4)).to_string(), "Window not found: 4");
    assert_eq!(HostError::TabNotFound(TabId(12)).to_string(), "Tab not found: 12");
    assert_eq!(
        HostError::Unavailable("port closed".to_string()).to_string(),
        "Host unavailable: port closed"
    );
    assert_eq!(
        HostError::Rejected("bad index".to_string()).to_string(),
        "Host rejected command: bad index"
    );
}

// === FetchError Tests ===

#[test]
fn fetch_error_keeps_host_error_as_source() {
    use std::error::Error;

    let err = FetchError::Windows(HostError::Unavailable("offline".to_string()));
    assert_eq!(err.to_string(), "Failed to fetch windows: Host unavailable: offline");
    let source = err.source().expect("fetch error should expose its cause");
    assert_eq!(source.to_string(), "Host unavailable: offline");
}

#[test]
fn fetch_error_current_window_display() {
    let err = FetchError::CurrentWindow(HostError::WindowNotFound(WindowId(2)));
    assert_eq!(err.to_string(), "Failed to fetch current window: Window not found: 2");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::Io("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::Serialization("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("foo.bar".to_string()).to_string(),
        "Invalid settings key: foo.bar"
    );
    assert_eq!(
        SettingsError::InvalidValue("nope".to_string()).to_string(),
        "Invalid settings value: nope"
    );
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(MutationError::ReorderTargetMissing(WindowId(1)));
    assert!(err.source().is_none());
    let err: Box<dyn std::error::Error> = Box::new(HostError::TabNotFound(TabId(1)));
    assert!(err.source().is_none());
}
