//! Application-wide configuration (§11). Trimmed from the teacher's `AppConfig` to the fields a
//! stateless HTTP judge needs: bind address, runner endpoint, and default/maximum resource limits.
//!
//! Unlike the teacher's `config::app_config()` process-wide singleton, this is handed to request
//! handlers through Axum's `State` extractor — an `unsafe` mutable static has no good answer for
//! "what if two requests race on first access" in an async multi-threaded server, so it is not
//! carried forward here.
//!

use std::path::Path;

use serde::Deserialize;

use judge_core::ResourceLimits;

error_chain::error_chain! {
    errors {
        InvalidConfigFile {
            description("invalid config file")
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    pub runner_url: String,

    #[serde(default = "default_time_limit_ms")]
    pub default_time_limit_ms: u64,

    #[serde(default)]
    pub default_memory_limit_mb: Option<u64>,

    #[serde(default = "default_max_time_limit_ms")]
    pub max_time_limit_ms: u64,

    #[serde(default)]
    pub max_memory_limit_mb: Option<u64>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_time_limit_ms() -> u64 {
    5000
}

fn default_max_time_limit_ms() -> u64 {
    15000
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path)
            .chain_err(|| ErrorKind::InvalidConfigFile)?;
        serde_yaml::from_str(&content).chain_err(|| ErrorKind::InvalidConfigFile)
    }

    /// Resolve a request's requested limits against this config's defaults and caps. A caller that
    /// asks for more than `max_time_limit_ms`/`max_memory_limit_mb` is clamped down rather than
    /// rejected.
    pub fn clamp_limits(&self, time_limit_ms: Option<u64>, memory_limit_mb: Option<u64>) -> ResourceLimits {
        let time_limit_ms = time_limit_ms
            .unwrap_or(self.default_time_limit_ms)
            .min(self.max_time_limit_ms);

        let memory_limit_mb = memory_limit_mb.or(self.default_memory_limit_mb).map(|requested| {
            match self.max_memory_limit_mb {
                Some(max) => requested.min(max),
                None => requested,
            }
        });

        ResourceLimits { time_limit_ms, memory_limit_mb }
    }
}
