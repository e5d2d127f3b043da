pub mod paths;

use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budgetzen=info,zen_core=info,zen_storage_json=info";

/// Initializes the global tracing subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(
                std::env::var(EnvFilter::DEFAULT_ENV)
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string()),
            );

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
