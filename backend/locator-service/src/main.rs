use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use locator_service::{
    db, handlers, Config, InventoryRepository, LocatorState, PharmacyRanker,
    SqliteInventoryRepository,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,locator_service=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Starting locator-service v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.http_host,
        config.http_port
    );
    info!(
        max_radius_km = config.ranking.max_radius_km,
        stock_weight = config.ranking.stock_weight,
        distance_weight = config.ranking.distance_weight,
        freshness_weight = config.ranking.freshness_weight,
        "Ranking configuration loaded"
    );

    // Initialize SQLite pool
    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create SQLite pool")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run locator-service migrations")?;
    info!("Database migrations applied");

    let inventory: Arc<dyn InventoryRepository> = Arc::new(SqliteInventoryRepository::new(pool));
    let state = web::Data::new(LocatorState::new(
        inventory,
        PharmacyRanker::new(config.ranking.clone()),
    ));

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
