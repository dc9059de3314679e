use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static LOGGING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "warn";

/// Picks the log filter: `--verbose` wins, then `RUST_LOG`, then the config
/// file's `log.level`, then `warn`.
pub fn filter_directive(verbose: bool, env: Option<&str>, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|value| !value.trim().is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Installs the stderr subscriber once per process. Later calls are no-ops.
pub fn init_logging(verbose: bool, configured: Option<&str>) {
    LOGGING_INIT.call_once(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let directive = filter_directive(verbose, env.as_deref(), configured);
        let filter = EnvFilter::try_new(directive.as_str()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .try_init();
    });
}
