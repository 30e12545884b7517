mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppConfig, database::{DocumentStore, MongoDB}, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Panics vão para o log; em release o processo aborta (panic = "abort")
    std::panic::set_hook(Box::new(|info| {
        log::error!("💥 Panic: {}", info);
    }));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Microfinance Service...");

    let store: Arc<dyn DocumentStore> = match MongoDB::connect_with_retry(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("❌ All retries exhausted. MongoDB connection failed permanently: {}", e);
            log::error!("Please check your MongoDB connection settings. Exiting...");
            std::process::exit(1);
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let state = web::Data::new(AppState::new(store.clone(), config.bcrypt_cost));
    let bind_addr = (config.host.clone(), config.port);
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let server = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CACHE_CONTROL,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run();

    let result = server.await;

    store.shutdown().await;
    log::info!("👋 Server stopped");

    result
}
