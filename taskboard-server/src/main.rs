//! `Taskboard` -- read-only task and schedule dashboard.
//!
//! An axum HTTP server that renders `/` (task board) and `/schedules`
//! (schedule board) from two remote JSON documents.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:3000
//! cargo run --bin taskboard
//!
//! # Run on custom address against local documents
//! cargo run --bin taskboard -- --bind 127.0.0.1:8080 \
//!     --tasks-url http://localhost:9000/TASKS.json \
//!     --schedules-url http://localhost:9000/CRON.json
//!
//! # Or via environment variables
//! TASKBOARD_ADDR=127.0.0.1:8080 cargo run --bin taskboard
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::config::{DashboardCliArgs, DashboardConfig};
use taskboard_server::pages::{self, AppState};

#[tokio::main]
async fn main() {
    let cli = DashboardCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match DashboardConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        addr = %config.bind_addr,
        tasks_url = %config.sources.tasks,
        schedules_url = %config.sources.schedules,
        revalidate_secs = config.revalidate.as_secs(),
        "starting taskboard server"
    );

    let state = match AppState::from_config(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            std::process::exit(1);
        }
    };

    match pages::start_server(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "taskboard server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "taskboard server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start taskboard server");
            std::process::exit(1);
        }
    }
}
