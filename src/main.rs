// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, platform registry and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod platforms;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use platforms::{
    FacebookPlatform, GoogleMapsPlatform, InstagramPlatform, PlatformAdapter, ShopeePlatform,
    TokopediaPlatform,
};
use services::{ExternalPlatformsService, GooglePlacesClient};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        // We continue but log error, or we could panic
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting pawhub-services microservice...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Build the platform registry and aggregator
    // Constructed once here and injected as app state - the registry is
    // read-only for the lifetime of the process
    let google_client = GooglePlacesClient::new(config.google_maps_api_key.clone());
    let google_enabled = !config.google_maps_api_key.is_empty();

    let registry: Vec<Arc<dyn PlatformAdapter>> = vec![
        Arc::new(GoogleMapsPlatform::new(
            google_client,
            google_enabled,
            config.search_radius_m,
        )),
        Arc::new(InstagramPlatform::new()),
        Arc::new(FacebookPlatform::new()),
        Arc::new(TokopediaPlatform::new()),
        Arc::new(ShopeePlatform::new()),
    ];

    let aggregator = web::Data::new(ExternalPlatformsService::new(registry));
    log::info!(
        "Platform registry initialized ({} enabled)",
        aggregator.platforms().len()
    );

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (database pool and aggregator)
            .app_data(web::Data::new(pool.clone()))
            .app_data(aggregator.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::external_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
