//! Property-based tests for the active-window flag.
//!
//! Whatever sequence of moves and closes the host goes through, a refresh
//! leaves exactly one window flagged active, and it is the host's current
//! window.

use proptest::prelude::*;
use tabdeck::managers::snapshot_cache::{SnapshotCache, SnapshotCacheTrait};
use tabdeck::services::event_bridge::{refresh_all, HostEventBridge};
use tabdeck::services::host::{HostApi, MoveProperties};
use tabdeck::services::memory_host::MemoryHost;

#[derive(Debug, Clone)]
enum HostOp {
    Move { tab: usize, window: usize, index: usize },
    Close { tab: usize },
}

fn arb_ops() -> impl Strategy<Value = Vec<HostOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0usize..32, 0usize..4, 0usize..8)
                .prop_map(|(tab, window, index)| HostOp::Move { tab, window, index }),
            1 => (0usize..32).prop_map(|tab| HostOp::Close { tab }),
        ],
        1..20,
    )
}

async fn run(ops: Vec<HostOp>) -> Result<(), TestCaseError> {
    let host = MemoryHost::new();
    for w in 0..3 {
        let titles: Vec<(String, String)> = (0..4)
            .map(|t| (format!("w{} t{}", w, t), format!("https://{}.{}", w, t)))
            .collect();
        let refs: Vec<(&str, &str)> = titles.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        host.open_window(&refs);
    }

    let cache = SnapshotCache::new();
    let mut bridge = HostEventBridge::attach(&host, cache.clone());
    refresh_all(&host, &cache)
        .await
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    for op in ops {
        let windows = host.windows();
        let tabs: Vec<_> = windows.iter().flat_map(|w| w.tabs.iter().map(|t| t.id)).collect();
        if tabs.len() <= 1 {
            break;
        }
        let _ = match op {
            HostOp::Move { tab, window, index } => {
                let target = windows[window % windows.len()].id;
                host.move_tab(tabs[tab % tabs.len()], MoveProperties { window_id: target, index })
                    .await
            }
            HostOp::Close { tab } => host.remove_tab(tabs[tab % tabs.len()]).await,
        };

        while let Some(event) = bridge.poll_event() {
            let _ = bridge.handle(&host, &event).await;
        }

        let snapshot = cache.get();
        let active: Vec<_> = snapshot.iter().filter(|w| w.is_active_window).collect();
        prop_assert_eq!(active.len(), 1);

        let current = host
            .get_current_window(false)
            .await
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(active[0].id, current.id);
        prop_assert!(snapshot.iter().all(|w| !w.tabs.is_empty()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn exactly_one_active_window_after_events(ops in arb_ops()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(run(ops))?;
    }
}
