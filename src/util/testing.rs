//! Shared test setup: tracing subscriber and a small sample chart.

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Account, AccountGroup};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "chartsort=trace");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Balance-sheet groups in deliberately scrambled input order.
///
/// Ordered: Assets, Current Assets, Fixed Assets, Liabilities, Equity.
pub fn sample_groups() -> Vec<AccountGroup> {
    vec![
        AccountGroup::root("Equity").after("Liabilities"),
        AccountGroup::child("Fixed Assets", "Assets").after("Current Assets"),
        AccountGroup::root("Liabilities").after("Assets"),
        AccountGroup::child("Current Assets", "Assets"),
        AccountGroup::root("Assets"),
    ]
}

/// Accounts for [`sample_groups`]; "Inventory" follows "Cash".
pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account::new("Inventory", "Current Assets").after("Cash"),
        Account::new("Cash", "Current Assets"),
        Account::new("Machinery", "Fixed Assets"),
        Account::new("Loans", "Liabilities"),
        Account::new("Retained Earnings", "Equity"),
    ]
}
