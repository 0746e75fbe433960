//! Property-based tests for PopupSettings serialization round-trip.
//!
//! Any valid settings value written to JSON reads back unchanged.

use proptest::prelude::*;
use tabdeck::types::settings::{BehaviorSettings, LoggingSettings, PopupSettings, SearchSettings};

fn arb_search_settings() -> impl Strategy<Value = SearchSettings> {
    (0u32..=16, any::<bool>(), any::<bool>()).prop_map(|(sixteenths, match_title, match_url)| {
        SearchSettings {
            threshold: f64::from(sixteenths) / 16.0,
            match_title,
            match_url,
        }
    })
}

fn arb_behavior_settings() -> impl Strategy<Value = BehaviorSettings> {
    (any::<bool>(), any::<bool>()).prop_map(|(close_popup_on_window_switch, wrap_keyboard_focus)| {
        BehaviorSettings {
            close_popup_on_window_switch,
            wrap_keyboard_focus,
        }
    })
}

fn arb_logging_settings() -> impl Strategy<Value = LoggingSettings> {
    "(trace|debug|info|warn|error)(,tabdeck=(debug|trace))?".prop_map(|filter| LoggingSettings { filter })
}

fn arb_popup_settings() -> impl Strategy<Value = PopupSettings> {
    (arb_search_settings(), arb_behavior_settings(), arb_logging_settings()).prop_map(
        |(search, behavior, logging)| PopupSettings {
            search,
            behavior,
            logging,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_popup_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: PopupSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}
