//! Runs `rspec` suites under libtest.

use std::sync::Arc;

use rspec::{block::Suite, report::Report, ConfigurationBuilder, Logger, Runner};

/// Runs `suite` on one thread and panics if any scenario failed.
///
/// rspec catches panics raised inside `then` blocks, so the report is the
/// only place a failure shows up.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(
        report.is_success(),
        "rspec suite failed: {} of {} scenarios",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}
