mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod test_utils;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpServer,
};
use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::db::Database;
use crate::middleware::SecurityHeaders;
use crate::routes::create_routes;
use crate::services::AdminService;

pub struct AppState {
    pub db: Database,
    pub config: Config,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting site content backend");

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded from environment");

    let db = Database::new(&config.database_url, config.database_max_connections).await?;
    info!("Database connected");

    db.run_migrations().await?;

    AdminService::new(&db).ensure_seeded(&config).await?;

    std::fs::create_dir_all(&config.upload_dir)?;
    info!("Serving uploads from {}", config.upload_dir.display());

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let state = web::Data::new(AppState {
        db,
        config: config.clone(),
    });

    info!("Server running at http://{}", addr);

    HttpServer::new(move || {
        // Credentials need an explicit origin, so "*" echoes the caller's origin
        let cors = if config.cors_allow_origin == "*" {
            Cors::default()
                .allowed_origin_fn(|_origin, _req_head| true)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        } else {
            let mut cors = Cors::default();
            for origin in config.cors_allow_origin.split(',').map(str::trim) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::COOKIE,
                ])
                .supports_credentials()
                .max_age(3600)
        };

        let app_config = config.clone();
        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(SecurityHeaders::new(config.hsts_enabled))
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(move |cfg| create_routes(cfg, &app_config))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
