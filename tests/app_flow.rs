//! End-to-end flow across both screens with a recording navigator.

use ledgergate::gate::{EntryScreen, GateError, Verdict};
use ledgergate::ledger::{ChartConfig, HomeScreen};
use ledgergate::{AppConfig, Navigator, Route};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Router {
    routes: Mutex<Vec<Route>>,
}

impl Router {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for Router {
    fn navigate_replacing(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[tokio::test(start_paused = true)]
async fn login_then_logout_round_trip() {
    let config = AppConfig::default();
    let router = Router::default();

    let mut entry =
        EntryScreen::mount_with_rng(config.gate.clone(), &router, StdRng::seed_from_u64(21))
            .unwrap();
    entry.on_focus();
    entry.set_name("Alice");
    let code = entry.current_code();
    entry.set_guess(code.value());

    assert_eq!(entry.submit().await.unwrap(), Verdict::Accepted);
    assert_eq!(router.routes(), vec![Route::Home]);
    entry.unmount();

    let home = HomeScreen::mount(config.chart.clone(), &router).unwrap();
    assert_eq!(home.month_items().len(), 6);
    home.logout();

    assert_eq!(router.routes(), vec![Route::Home, Route::Entry]);
}

#[tokio::test(start_paused = true)]
async fn guess_against_a_rotated_code_is_rejected() {
    let router = Router::default();
    let mut entry = EntryScreen::mount_with_rng(
        AppConfig::default().gate,
        &router,
        StdRng::seed_from_u64(5),
    )
    .unwrap();
    entry.set_name("Bob");
    let stale = entry.current_code();
    entry.set_guess(stale.value());
    let mut codes = entry.subscribe_code();
    codes.borrow_and_update();

    // Wait for the next rotation to land, then submit the stale guess.
    tokio::time::sleep(Duration::from_millis(10_600)).await;
    assert!(codes.has_changed().unwrap());
    let current = entry.current_code();

    let verdict = entry.submit().await.unwrap();
    if current.value() == stale.value() {
        assert_eq!(verdict, Verdict::Accepted);
    } else {
        assert!(matches!(verdict.into_result(), Err(GateError::CodeMismatch)));
        assert_eq!(entry.guess(), stale.value());
        assert!(router.routes().is_empty());
    }
}

#[tokio::test]
async fn blank_name_blocks_login() {
    let router = Router::default();
    let mut entry = EntryScreen::mount(AppConfig::default().gate, &router).unwrap();
    entry.set_name("  ");
    entry.set_guess("1234");

    assert!(!entry.can_submit());
    assert!(matches!(
        entry.submit().await,
        Err(GateError::ValidationBlocked { .. })
    ));
    assert!(!entry.is_busy());
}

#[test]
fn chart_config_from_toml_reaches_the_home_screen() {
    let config = AppConfig::from_toml_str(
        r#"
        [chart]
        y_axis_label = "$"
        "#,
    )
    .unwrap();
    let router = Router::default();
    let home = HomeScreen::mount(config.chart, &router).unwrap();

    assert!(home.month_items()[0].credited_text.starts_with("Credited: $"));
    assert_eq!(home.chart().config.y_axis_label, "$");
    assert_eq!(ChartConfig::default().y_axis_label, "₹");
}
