//! Byteshelf Storefront - digital goods shop.
//!
//! This binary serves the public storefront and the admin panel.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON page payloads
//! - `SQLite` for all persistent data
//! - tower-sessions with a `SQLite` store for login state and carts
//! - Argon2id password hashing

#![cfg_attr(not(test), forbid(unsafe_code))]

use byteshelf_storefront::config::StoreConfig;
use byteshelf_storefront::state::AppState;
use byteshelf_storefront::{db, middleware, services};

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "byteshelf_storefront=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load configuration from environment
    let config = StoreConfig::from_env().expect("Failed to load configuration");

    // Initialize database connection pool and schema
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Session store keeps its own table
    let session_store = middleware::create_session_store(&pool)
        .await
        .expect("Failed to create session store");
    let session_layer = middleware::create_session_layer(session_store);

    // Make sure an admin account exists
    services::bootstrap::ensure_admin(&pool, &config)
        .await
        .expect("Failed to bootstrap admin account");

    // Build application state and router
    let addr = config.socket_addr();
    let state = AppState::new(config, pool);
    let app = byteshelf_storefront::app(state, session_layer);

    // Start server
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
