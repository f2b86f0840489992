//! Job board backend server
//!
//! Entry point: configuration loading, database migrations and HTTP server
//! startup.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use jobboard_backend::bootstrap::maybe_provision_company;
use jobboard_backend::state::{AppState, ListingSettings};

mod cli;
mod config_helpers;
mod tracing_setup;

use cli::{CliArgs, Command};
use config_helpers::{cors_layer_from_config, database_config_from_config, parse_bind_address};
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eprintln!("[STARTUP] Job board backend starting...");
    let args = CliArgs::parse();

    eprintln!("[STARTUP] Loading config from: {:?}", args.config_path);
    let config = load_config(args.config_path.as_deref())?;
    eprintln!("[STARTUP] Config loaded successfully");

    install_tracing_from_config(&config.logging);

    let db_cfg = database_config_from_config(&config)?;
    let db_pool = jobboard_db::create_pool(&db_cfg).await?;
    run_migrations(&db_pool).await?;
    eprintln!("[STARTUP] Database migrations completed");

    if args.command() == Command::Migrate {
        tracing::info!("migrations applied; exiting");
        return Ok(());
    }

    tracing::info!(
        db_max_connections = %db_cfg.max_connections,
        default_limit = config.listing.default_limit,
        "database and listing configuration"
    );

    let state = Arc::new(AppState::new(db_pool).with_listing(ListingSettings {
        default_limit: config.listing.default_limit,
    }));

    if let Err(e) = maybe_provision_company(&state).await {
        tracing::error!(%e, "failed to provision company from environment");
        eprintln!("[STARTUP] Company provisioning error: {e}");
    }

    let cors = cors_layer_from_config(&config.cors);
    let app = jobboard_backend::build_router_with_cors(state, cors);

    let addr = parse_bind_address(&config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] Server listening on {addr}");
    tracing::info!(%addr, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Load configuration from file or defaults.
fn load_config(path: Option<&str>) -> anyhow::Result<jobboard_config::Config> {
    jobboard_config::load_config(path).map_err(|e| {
        eprintln!("failed to load configuration: {e}");
        anyhow::anyhow!(e.to_string())
    })
}

async fn run_migrations(db_pool: &jobboard_db::DbPool) -> anyhow::Result<()> {
    tracing::info!("applying SQLite migrations");
    match jobboard_migrations::sqlite_migrator().run(db_pool).await {
        Ok(()) => {
            tracing::info!("database migrations applied successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%e, "failed to apply database migrations");
            Err(anyhow::anyhow!("failed to apply database migrations: {e}"))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
