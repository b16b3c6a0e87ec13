use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::site_config::{MarketingPixels, SettingKey};
use crate::services::SiteConfigService;
use crate::AppState;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": true }))
}

pub async fn health_check_db(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    sqlx::query("SELECT 1")
        .execute(state.db.pool())
        .await
        .map_err(AppError::Database)?;

    Ok(HttpResponse::Ok().json(json!({ "status": true })))
}

/// Everything the public site needs to decide whether to show the
/// maintenance page.
pub async fn maintenance_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let service = SiteConfigService::new(&state.db);

    let maintenance = service
        .get_value(SettingKey::MaintenanceMode.as_str())
        .await?
        .unwrap_or_else(|| json!({ "enabled": false }));
    let general = service
        .get_value(SettingKey::GeneralInfo.as_str())
        .await?
        .unwrap_or_else(|| json!({}));

    Ok(HttpResponse::Ok().json(json!({
        "maintenance": maintenance,
        "general": general,
    })))
}

pub async fn robots_txt(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let body = match indexing_enabled(&state).await {
        Ok(true) => {
            let conn = req.connection_info();
            format!(
                "User-agent: *\nAllow: /\n\nSitemap: {}://{}/sitemap.xml",
                conn.scheme(),
                conn.host()
            )
        }
        Ok(false) => "User-agent: *\nDisallow: /".to_string(),
        Err(e) => {
            tracing::warn!("Falling back to permissive robots.txt: {}", e);
            "User-agent: *\nAllow: /".to_string()
        }
    };

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

async fn indexing_enabled(state: &AppState) -> AppResult<bool> {
    let value = SiteConfigService::new(&state.db)
        .get_value(SettingKey::MarketingPixels.as_str())
        .await?
        .unwrap_or(Value::Null);

    // Anything unreadable counts as "not configured"
    let pixels: MarketingPixels = serde_json::from_value(value).unwrap_or_default();
    Ok(pixels.indexing_enabled())
}
