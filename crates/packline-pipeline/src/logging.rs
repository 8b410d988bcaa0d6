//! Logging for pipeline drivers.
//!
//! This module is only available with the `logging` feature.
//!
//! Composition emits tracing events; library users install their own
//! subscriber. A CLI-style driver calls [`init`] once with the project's
//! declared settings instead.

use std::sync::Once;

use packline_config::GlobalSettings;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static INIT: Once = Once::new();

/// Install the global subscriber for a driver process.
///
/// The declared `settings.log_level` seeds the default filter directive,
/// `RUST_LOG` overrides it, and an unparsable level falls back to `info`.
/// Only the first call per process takes effect.
pub fn init(settings: &GlobalSettings) {
    init_with_directive(settings.log_level.as_deref().unwrap_or("info"));
}

/// Install the global subscriber from `RUST_LOG` alone, defaulting to
/// `info`.
pub fn init_from_env() {
    init_with_directive("info");
}

fn init_with_directive(directive: &str) {
    INIT.call_once(|| {
        let default = directive
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default)
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    });
}
