use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use dotenvy::dotenv;
use log::info;
use sqlx::mysql::MySqlPoolOptions;

use tg_api::config::AppConfig;
use tg_api::middleware::{create_cors, TokenServiceWrapper};
use tg_api::app;
use tg_core::services::token::TokenService;
use tg_infra::MySqlTokenStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Tokengate API server");

    let config = AppConfig::from_env();

    let pool = MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let store = MySqlTokenStore::new(pool);
    let tokens: Arc<dyn TokenServiceWrapper> =
        Arc::new(TokenService::new(store, config.token.clone()));

    let bind_address = format!("{}:{}", config.host, config.port);
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .configure(|cfg| app::configure(cfg, Arc::clone(&tokens)))
    })
    .bind(bind_address)?
    .run()
    .await
}
