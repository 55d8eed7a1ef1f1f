//! Withdrawal Service - Main Application Entry Point
//!
//! REST API server for withdrawing money from accounts. Each withdrawal
//! debits the account balance and triggers an external disbursement; a failed
//! disbursement is compensated so no money disappears.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Select the balance store: Postgres when `DATABASE_URL` is set (with
//!    migrations), in-memory otherwise
//! 3. Select the disburser: HTTP client when `DISBURSEMENT_URL` is set,
//!    no-op otherwise
//! 4. Build the router and start serving

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use withdrawal_service::{
    AppState, app, config, db,
    disburse::{Disburser, HttpDisburser, NoopDisburser},
    services::withdrawal_service::WithdrawalService,
    store::{BalanceStore, MemoryStore, PostgresStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Select the balance store backend
    let store: Arc<dyn BalanceStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            Arc::new(PostgresStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory balance store");
            Arc::new(MemoryStore::new())
        }
    };

    // Select the disbursement capability
    let disburser: Arc<dyn Disburser> = match &config.disbursement_url {
        Some(url) => {
            tracing::info!("Disbursing via {}", url);
            Arc::new(HttpDisburser::new(url)?)
        }
        None => {
            tracing::warn!("DISBURSEMENT_URL not set, disbursements are acknowledged locally");
            Arc::new(NoopDisburser)
        }
    };

    let state = AppState {
        withdrawals: WithdrawalService::new(store.clone(), disburser),
        store,
    };

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app(state)).await?;

    Ok(())
}
