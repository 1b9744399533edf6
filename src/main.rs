//! Product API - A product catalog service
//!
//! CRUD over a MySQL `PRODUCTS` table with a look-aside cache in front of the
//! reads.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_api::cache::{Cache, MemoryCache, RedisCache};
use product_api::config::{CacheBackend, Config};
use product_api::store::{MemoryProductStore, MySqlProductStore, ProductStore};
use product_api::{create_router, spawn_cleanup_task, AppState, ProductRepository};

/// Main entry point for the product service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the product store and the cache
/// 4. Prime the listing cache
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache={:?}, cache_ttl={}s, write_ttl={:?}",
        config.server_port, config.cache_backend, config.cache_ttl, config.cache_write_ttl
    );

    let store = connect_store(&config).await?;
    let (cache, cleanup_handle) = connect_cache(&config).await?;

    let repository = ProductRepository::with_policy(store, cache, config.cache_policy());
    if let Err(err) = repository.prime_cache().await {
        warn!("Could not prime listing cache: {}", err);
    }

    let app = create_router(AppState::new(repository));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    match &config.database_url {
        Some(url) => {
            let store = MySqlProductStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to MySQL")?;
            store
                .ensure_schema()
                .await
                .context("failed to create PRODUCTS table")?;
            let store: Arc<dyn ProductStore> = Arc::new(store);
            Ok(store)
        }
        None => {
            warn!("No DATABASE_URL or MYSQL_HOST set, products are kept in memory");
            let store: Arc<dyn ProductStore> = Arc::new(MemoryProductStore::new());
            Ok(store)
        }
    }
}

async fn connect_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn Cache>, Option<JoinHandle<()>>)> {
    match config.cache_backend {
        CacheBackend::Redis => {
            let cache = RedisCache::connect(&config.redis_url)
                .await
                .context("failed to connect to Redis")?;
            let cache: Arc<dyn Cache> = Arc::new(cache);
            Ok((cache, None))
        }
        CacheBackend::Memory => {
            let cache = MemoryCache::new();
            let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
            info!("In-memory cache initialized");
            let cache: Arc<dyn Cache> = Arc::new(cache);
            Ok((cache, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
