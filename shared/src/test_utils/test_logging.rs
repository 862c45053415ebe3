use env_logger::Builder;
use log::LevelFilter;
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
///
/// Defaults to errors only. Set LOG_LEVEL (error, warn, info, debug, trace)
/// to see store and router logs while a test runs.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let level_filter = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| LevelFilter::from_str(&level).ok())
            .unwrap_or(LevelFilter::Error);

        let _ = Builder::from_default_env()
            .filter_level(level_filter)
            .is_test(true)
            .try_init();
    });
}
