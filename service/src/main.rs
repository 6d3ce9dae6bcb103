//! Entry point: parse CLI flags, load configuration, and serve the judge HTTP API.
//!

use clap::Parser;

use service::config::AppConfig;
use service::{build_router, AppState};

#[derive(Parser)]
#[command(name = "judge-service")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(long)]
    config: String,

    /// Overrides the configured bind address, e.g. "0.0.0.0:9000".
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    service::logging::init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_file(&cli.config).unwrap_or_else(|err| {
        tracing::error!(error = %err, path = %cli.config, "failed to load configuration");
        std::process::exit(1);
    });
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, addr = %bind_addr, "failed to bind");
            std::process::exit(1);
        });

    tracing::info!(addr = %bind_addr, "judge service listening");
    if let Err(err) = axum::serve(listener, router).await {
        tracing::error!(error = %err, "server error");
    }
}
