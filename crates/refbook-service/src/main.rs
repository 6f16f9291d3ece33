//! Refbook lookup HTTP server binary.

use refbook_loader::{discover_refbook_files, LoaderConfig, RefbookStore};
use refbook_service::{api, FixedClock, RefbookServer, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServiceConfig::from_env();

    tracing::info!("Loading refbook data from: {}", config.data_path.display());
    let files = discover_refbook_files(&config.data_path)?;

    let loader_config = LoaderConfig {
        skip_invalid: config.skip_invalid_rows,
    };
    let mut store = RefbookStore::new();
    let stats = store.load_all(&files, &loader_config)?;

    tracing::info!(
        "Loaded {} rows: {} refbooks, {} versions, {} elements",
        stats.total(),
        stats.refbooks,
        stats.versions,
        stats.elements
    );
    if stats.skipped > 0 {
        tracing::warn!("Skipped {} invalid rows", stats.skipped);
    }

    let mut server = RefbookServer::new(store);
    if let Some(today) = config.fixed_today {
        tracing::info!("Current-version date pinned to {}", today);
        server = server.with_clock(FixedClock(today));
    }

    let addr = config.bind_addr();
    tracing::info!("Starting refbook server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api::router(server)).await?;

    Ok(())
}
