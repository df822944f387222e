// src/logging.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber for a binary.
///
/// `RUST_LOG` wins over `default_filter`; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}
