//! Boutique storefront - public shop API.
//!
//! Serves the catalog, the session cart and the WhatsApp order handoff.
//!
//! # Storage
//!
//! With `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) set, products and
//! sessions live in `PostgreSQL`. Without it both live in memory and the
//! catalog is seeded with demo products unless `STOREFRONT_SEED_CATALOG=false`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use boutique_core::catalog::demo_products;
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::db::{self, CatalogStore, InMemoryProductRepository, PgProductRepository};
use boutique_storefront::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boutique_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let addr = config.socket_addr();

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p boutique-cli -- migrate
    let app = if let Some(database_url) = &config.database_url {
        let pool = db::create_pool(database_url)
            .await
            .expect("Failed to create database pool");
        tracing::info!("Database pool created");

        let catalog = CatalogStore::Postgres(PgProductRepository::new(pool.clone()));
        let state = AppState::new(config.clone(), catalog);
        boutique_storefront::app(state, PostgresStore::new(pool))
    } else {
        let catalog = if config.seed_catalog {
            InMemoryProductRepository::seeded(demo_products())
        } else {
            InMemoryProductRepository::new()
        };
        tracing::warn!(
            seeded = config.seed_catalog,
            "No database configured, catalog and sessions are in memory"
        );

        let state = AppState::new(config.clone(), CatalogStore::Memory(catalog));
        boutique_storefront::app(state, MemoryStore::default())
    };

    tracing::info!(
        order_phone = config.order_handoff.phone(),
        "storefront listening on {}",
        addr
    );

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
