//! The judge service: an Axum HTTP frontend over the Dispatcher (§4.7), which composes
//! `judge-core`, `harness` and `sandbox-client` into the three judge endpoints described in §6.
//!

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod model;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
