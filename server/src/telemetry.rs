use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,baggage_server=debug,tower_http=debug";

/// Install the global fmt subscriber. Honors `RUST_LOG`; safe to call twice.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();

    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    });
}
