//! Tabdeck — demo mode.
//!
//! Runs the popup core against an in-memory browser and prints what the
//! view layer would render after each step.

use tabdeck::app::{PopupApp, PopupView};
use tabdeck::logging;
use tabdeck::managers::focus_manager::NavKey;
use tabdeck::services::memory_host::MemoryHost;
use tabdeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use tabdeck::types::drag::DragLocation;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut engine = SettingsEngine::new(std::env::var("TABDECK_SETTINGS").ok());
    let settings = engine.load().unwrap_or_default();
    logging::init(&settings.logging.filter);

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Tabdeck v{} — Demo Mode                   ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let host = MemoryHost::new();
    let w1 = host.open_window(&[
        ("GitHub", "https://github.com"),
        ("The Rust Book", "https://doc.rust-lang.org/book/"),
        ("crates.io", "https://crates.io"),
    ]);
    let w2 = host.open_window(&[
        ("Tokio docs", "https://docs.rs/tokio"),
        ("Hacker News", "https://news.ycombinator.com"),
    ]);

    let mut app = PopupApp::mount(host.clone(), settings).await;

    section("Initial fetch");
    let view = app.view("");
    print_view(&view);

    section("Search \"rust\"");
    print_view(&app.view("rust"));

    section("Reorder: drag crates.io to the top of the current window");
    let crates = app.snapshot()[0].tabs[2].id;
    app.begin_drag(crates, DragLocation::new(w1, 2));
    println!("  Search enabled while dragging: {}", app.search_enabled());
    let report = app.end_drag(Some(DragLocation::new(w1, 0))).await;
    println!("  Commit: {:?}", report.map(|r| r.outcome));
    print_view(&app.view(""));
    let handled = app.drain_events().await;
    println!("  Reconciled {} host event(s)", handled);

    section("Move: drag Hacker News into the current window");
    let hn = app.snapshot()[1].tabs[1].id;
    app.begin_drag(hn, DragLocation::new(w2, 1));
    app.end_drag(Some(DragLocation::new(w1, 1))).await;
    app.drain_events().await;
    print_view(&app.view(""));

    section("Close the last tab of the other window");
    let tokio_tab = app.snapshot()[1].tabs[0].id;
    if let Err(e) = app.close_tab(tokio_tab).await {
        println!("  Close failed: {}", e);
    }
    app.drain_events().await;
    print_view(&app.view(""));

    section("Keyboard: Down, Down, Enter");
    app.handle_key(NavKey::Down);
    app.handle_key(NavKey::Down);
    if let Some(tab) = app.handle_key(NavKey::Enter) {
        match app.activate_tab(tab).await {
            Ok(outcome) => println!("  Activated tab {}: {:?}", tab, outcome),
            Err(e) => println!("  Activation failed: {}", e),
        }
    }

    app.unmount();
    println!();
    println!("  Host listeners left registered: {}", host.listener_count());
    println!();
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_view(view: &PopupView) {
    if view.error {
        println!("  [error] could not load windows, retry available");
    }
    if let Some(active) = &view.active {
        println!("  Current window ({})", active.id);
        for tab in &active.tabs {
            println!("    {} {}  <{}>", if tab.active { "*" } else { " " }, tab.title, tab.url);
        }
    }
    for window in &view.others {
        println!("  Window {}", window.id);
        for tab in &window.tabs {
            println!("    {} {}  <{}>", if tab.active { "*" } else { " " }, tab.title, tab.url);
        }
    }
    println!();
}
