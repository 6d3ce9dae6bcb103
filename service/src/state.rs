//! Shared request-handler state: the resolved configuration and a pooled sandbox client. Cloned
//! cheaply into every handler via Axum's `State` extractor; nothing in here is request-scoped.
//!

use std::sync::Arc;

use sandbox_client::SandboxClient;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sandbox: SandboxClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sandbox = SandboxClient::new(config.runner_url.clone());
        AppState { config: Arc::new(config), sandbox }
    }
}
