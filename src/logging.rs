//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set. Otherwise each environment gets its own
//! directives: quote computations log at debug and store writes at info.

use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is absent or unparsable.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "movequote_backend=debug,tower_http=debug,info",
        Environment::Staging => "movequote_backend=debug,tower_http=info,info",
        Environment::Prod => "movequote_backend=info,tower_http=warn,warn",
    }
}

fn env_filter(env: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)))
}

/// Install the global subscriber. Prod emits one JSON object per event so
/// the log shipper can index the quote fields; other environments print
/// human readable output with source locations in dev.
pub fn init_logging(env: &Environment) {
    let registry = tracing_subscriber::registry().with(env_filter(env));
    let fmt = tracing_subscriber::fmt::layer().with_target(true);

    match env {
        Environment::Prod => registry.with(fmt.json().flatten_event(true)).init(),
        Environment::Staging => registry.with(fmt.compact()).init(),
        Environment::Dev => registry
            .with(fmt.pretty().with_file(true).with_line_number(true))
            .init(),
    }

    tracing::info!(environment = ?env, "Logging initialized");
}
