#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use table_booker::{
    api::{AppState, build_router, serve},
    auth::TokenManager,
    config::{database, restaurant, server},
    core::seed::{self, SeedOutcome},
    errors::Result,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load configuration
    let server_config = server::load_server_config()
        .inspect_err(|e| error!("Failed to load server configuration: {}", e))?;
    let restaurant_config = restaurant::load_config(&server_config.restaurant_config_path)
        .inspect_err(|e| error!("Failed to load restaurant configuration: {}", e))?;

    // 4. Initialize database and seed the restaurant on first start
    let db = database::create_connection(&server_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema is ready"))
        .inspect_err(|e| error!("Failed to create database schema: {}", e))?;
    match seed::seed_restaurant(&db, &restaurant_config).await? {
        SeedOutcome::Seeded { tables } => info!("Seeded restaurant with {} tables", tables),
        SeedOutcome::AlreadySeeded => info!("Restaurant already seeded, keeping stored layout"),
    }

    // 5. Serve the API
    let tokens = TokenManager::new(&server_config.secret_key)
        .inspect_err(|e| error!("Invalid SECRET_KEY: {}", e))?;
    let app = build_router(AppState::new(db, tokens, server_config.token_ttl));

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!("Listening on {}", server_config.bind_address);

    serve(listener, app, shutdown_signal(), server_config.shutdown_timeout).await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
