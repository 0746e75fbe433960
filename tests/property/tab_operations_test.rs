//! Property-based tests for the optimistic tab mutations.
//!
//! These check that reorders and cross-window moves never lose or duplicate
//! a tab, that a dropped tab lands exactly at the drop index, and that
//! undoing a reorder restores the original order.

use proptest::prelude::*;
use tabdeck::services::optimistic::{move_between_windows, reorder_within_window};
use tabdeck::types::window::{Tab, TabId, Window, WindowId};

/// Windows with ids 1..=n and globally unique tab ids.
fn arb_windows() -> impl Strategy<Value = Vec<Window>> {
    prop::collection::vec(1usize..8, 1..5).prop_map(|sizes| {
        let mut next_tab = 0;
        sizes
            .into_iter()
            .enumerate()
            .map(|(wi, size)| {
                let tabs = (0..size)
                    .map(|_| {
                        next_tab += 1;
                        Tab::new(TabId(next_tab), &format!("Tab {}", next_tab), "https://example.com")
                    })
                    .collect();
                Window::new(WindowId(wi as i64 + 1), tabs)
            })
            .collect()
    })
}

fn all_tab_ids(windows: &[Window]) -> Vec<TabId> {
    let mut ids: Vec<TabId> = windows.iter().flat_map(|w| w.tabs.iter().map(|t| t.id)).collect();
    ids.sort();
    ids
}

// Tab conservation and exact landing index for reorders. Moving a tab back
// from `to` to `from` restores the original order.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reorder_conserves_tabs_and_round_trips(
        windows in arb_windows(),
        pick in any::<prop::sample::Index>(),
        from_seed in any::<prop::sample::Index>(),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let wi = pick.index(windows.len());
        let window_id = windows[wi].id;
        let len = windows[wi].tabs.len();
        let from = from_seed.index(len);
        let to = to_seed.index(len);
        let moved = windows[wi].tabs[from].id;

        let next = reorder_within_window(&windows, window_id, from, to).unwrap();

        prop_assert_eq!(all_tab_ids(&next), all_tab_ids(&windows));
        prop_assert_eq!(next[wi].tabs[to].id, moved);
        for (i, w) in next.iter().enumerate() {
            if i != wi {
                prop_assert_eq!(w, &windows[i]);
            }
        }

        let back = reorder_within_window(&next, window_id, to, from).unwrap();
        prop_assert_eq!(back, windows);
    }

    #[test]
    fn cross_window_move_lands_at_drop_index(
        windows in arb_windows(),
        src_seed in any::<prop::sample::Index>(),
        dst_seed in any::<prop::sample::Index>(),
        from_seed in any::<prop::sample::Index>(),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let src = src_seed.index(windows.len());
        let dst = dst_seed.index(windows.len());
        prop_assume!(src != dst);

        let from = from_seed.index(windows[src].tabs.len());
        // Inserting at the end is a valid drop.
        let to = to_seed.index(windows[dst].tabs.len() + 1);
        let moved = windows[src].tabs[from].id;

        let next = move_between_windows(&windows, windows[src].id, windows[dst].id, from, to).unwrap();

        prop_assert_eq!(all_tab_ids(&next), all_tab_ids(&windows));
        prop_assert_eq!(next[src].tabs.len(), windows[src].tabs.len() - 1);
        prop_assert_eq!(next[dst].tabs.len(), windows[dst].tabs.len() + 1);
        prop_assert_eq!(next[dst].tabs[to].id, moved);
        prop_assert!(next[src].tab_index(moved).is_none());
    }

    #[test]
    fn unknown_window_never_changes_anything(
        windows in arb_windows(),
        from in 0usize..8,
        to in 0usize..8,
    ) {
        let missing = WindowId(1_000);
        prop_assert!(reorder_within_window(&windows, missing, from, to).is_err());
        prop_assert!(move_between_windows(&windows, windows[0].id, missing, from, to).is_err());
        prop_assert!(move_between_windows(&windows, missing, windows[0].id, from, to).is_err());
    }
}
