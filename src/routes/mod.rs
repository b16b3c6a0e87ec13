pub mod auth;
pub mod collections;
pub mod configs;
pub mod documents;
pub mod site;
pub mod upload;

use actix_files::Files;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::AdminMiddleware;

/// Cap for JSON bodies; images go through multipart instead.
const JSON_LIMIT: usize = 1024 * 1024;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}

pub fn create_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .route("/health", web::get().to(site::health_check))
    .route("/health/db", web::get().to(site::health_check_db))
    .route("/robots.txt", web::get().to(site::robots_txt))
    .service(
        web::scope("/api")
            .route("/maintenance-check", web::get().to(site::maintenance_check))
            .route("/config", web::get().to(configs::get_public_config))
            .configure(collections::create_public_routes)
            .configure(documents::create_public_routes)
            .service(
                web::scope("/admin")
                    .configure(auth::create_public_routes)
                    .service(
                        web::scope("")
                            .wrap(AdminMiddleware)
                            .configure(auth::create_routes)
                            .configure(configs::create_routes)
                            .configure(upload::create_routes)
                            .configure(documents::create_routes)
                            .configure(collections::create_routes),
                    ),
            ),
    )
    .service(Files::new("/uploads", config.upload_dir.clone()));
}
