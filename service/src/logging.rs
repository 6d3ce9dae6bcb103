//! Logging initialization (§11). The teacher's `driver` configures `log4rs` from a YAML file;
//! this service is an async Axum server, so it follows the `tracing` + `tracing-subscriber` stack
//! instead, reading its filter from `RUST_LOG` the way every Tokio service in the pack does.
//!

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
