//! Logger bootstrap for the command line tool.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages such as skipped ineligible
/// entities are printed. Otherwise only info level and above are shown.
/// `RUST_LOG` takes precedence over both.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(level_for(verbose).to_string());
    let mut builder = Builder::from_env(env);

    // Only fails when a logger is already installed, e.g. across tests.
    if let Err(e) = builder.try_init() {
        debug!("Keeping existing logger: {e}");
    }
}

const fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
