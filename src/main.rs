//! Todo Server
//! Mission: Multi-user to-do lists behind JWT bearer authentication

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_backend::{build_router, config, db::Database, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment first so clap sees .env values
    config::load_env();
    let config = Config::parse();
    init_tracing();

    info!("🚀 Todo server starting");

    if config.uses_dev_secret() {
        warn!("⚠️  JWT_SECRET not set, using the development secret. CHANGE IN PRODUCTION!");
    }

    let db = Database::open(&config.database_path)?;
    let state = AppState::new(
        db,
        config.jwt_secret.clone(),
        config.token_ttl(),
        config.bcrypt_cost,
    );

    if let (Some(username), Some(password)) = (
        config.bootstrap_admin_username.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) {
        state.users.ensure_admin(username, password)?;
    }

    info!(
        "🔐 Authentication initialized (token ttl {} min)",
        config.token_ttl_minutes
    );

    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_backend=debug,todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
