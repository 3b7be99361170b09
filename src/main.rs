use std::sync::Arc;

mod app;
mod auth;
mod common;
mod config;
mod db;
mod error;
#[cfg(test)]
mod memory;
mod orders;
mod products;
mod schedules;
mod state;

use crate::{config::AppConfig, db::PgStore, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fitness_api=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let store = Arc::new(PgStore::connect_lazy(&config)?);

    // Requests against a missing database fail individually with 500s.
    match store.bootstrap().await {
        Ok(()) => tracing::info!("database schema ready"),
        Err(e) => tracing::warn!(error = %e, "database unavailable at startup; continuing"),
    }

    let state = AppState::new(&config, store);
    app::serve(app::build_app(state), config.bind_addr).await
}
