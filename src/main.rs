//! Server: connects the store, seeds it once, then serves the pages.

use axum::{extract::Request, ServiceExt};
use paises::{
    app, ensure_database_exists, method_override, seed_if_empty, AppState, Config, CountryStore,
    MemoryCountryStore, PgCountryStore, RestCountriesClient,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(paises::config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();
    let store = connect_store(&config).await?;

    // Seeding finishes, or fails and is logged, before any connection is accepted.
    let source = RestCountriesClient::new(config.countries_api_url.clone());
    match seed_if_empty(store.as_ref(), &source).await {
        Ok(outcome) => tracing::info!(?outcome, "seed step complete"),
        Err(e) => tracing::error!(error = %e, "seeding failed; continuing without seed data"),
    }

    let state = AppState::new(store);
    let router = app(state, &config.public_dir);
    let service = axum::middleware::from_fn(method_override).layer(router);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(service)).await?;
    Ok(())
}

async fn connect_store(config: &Config) -> Result<Arc<dyn CountryStore>, Box<dyn std::error::Error>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; records are kept in memory only");
        return Ok(Arc::new(MemoryCountryStore::new()));
    };
    ensure_database_exists(database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;
    let store = PgCountryStore::new(pool);
    store.ensure_collection().await?;
    tracing::info!(collection = paises::COLLECTION, "connected to PostgreSQL");
    Ok(Arc::new(store))
}
