//! This crate implements the Sandbox Client (§4.4): an HTTP client that submits learner or
//! harness-generated source to an external untrusted-code execution runner and classifies its raw
//! response into the four concepts the rest of the judge reasons about — stdout, stderr, exit
//! code, timed-out.
//!
//! The runner itself is out of scope: this crate only adapts its wire protocol. It never spawns a
//! process, never touches the filesystem and never runs anything outside the remote runner.
//!

mod classify;
mod client;
mod wire;

pub use classify::ExecuteOutcome;
pub use client::SandboxClient;

use thiserror::Error;

/// Failure modes this crate surfaces. `service` maps both onto the "upstream unavailable" verdict
/// path described in §4.4 — neither distinguishes further at the HTTP layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error contacting the code execution runner: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("code execution runner returned status {status}")]
    Upstream { status: reqwest::StatusCode },
}
