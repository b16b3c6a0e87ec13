use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::AuthAdmin;
use crate::models::site_config::ConfigUpdate;
use crate::services::SiteConfigService;
use crate::AppState;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/config")
            .route(web::get().to(get_admin_config))
            .route(web::post().to(set_config)),
    )
    .route("/config/{key}", web::delete().to(delete_config));
}

pub async fn get_public_config(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let entries = SiteConfigService::new(&state.db).get_all().await?;
    Ok(HttpResponse::Ok().json(entries))
}

async fn get_admin_config(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
) -> AppResult<HttpResponse> {
    let entries = SiteConfigService::new(&state.db).get_all().await?;
    Ok(HttpResponse::Ok().json(entries))
}

async fn set_config(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    form_data: web::Json<ConfigUpdate>,
) -> AppResult<HttpResponse> {
    let entry = SiteConfigService::new(&state.db)
        .upsert(&form_data.key, &form_data.value)
        .await?;

    tracing::info!("Config '{}' updated", entry.key);
    Ok(HttpResponse::Ok().json(entry))
}

async fn delete_config(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    key: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = key.into_inner();
    SiteConfigService::new(&state.db).delete(&key).await?;

    tracing::info!("Config '{}' removed", key);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{call_status, init_app, TestContext};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_config_upsert_read_delete() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;
        let auth = ("Authorization", format!("Bearer {}", ctx.admin_token()));

        let req = test::TestRequest::post()
            .uri("/api/admin/config")
            .insert_header(auth.clone())
            .set_json(json!({
                "key": "section_visibility",
                "value": { "faq": true, "testimonials": false }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let entry: Value = test::read_body_json(resp).await;
        assert_eq!(entry["key"], json!("section_visibility"));
        assert!(entry["updatedAt"].is_i64());

        let req = test::TestRequest::get().uri("/api/config").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["value"], json!({ "faq": true, "testimonials": false }));

        let req = test::TestRequest::delete()
            .uri("/api/admin/config/section_visibility")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::delete()
            .uri("/api/admin/config/section_visibility")
            .insert_header(auth)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_config_shape_errors() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;
        let auth = ("Authorization", format!("Bearer {}", ctx.admin_token()));

        let req = test::TestRequest::post()
            .uri("/api/admin/config")
            .insert_header(auth.clone())
            .set_json(json!({ "key": "maintenance_mode", "value": { "enabled": "soon" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/admin/config")
            .insert_header(auth)
            .set_json(json!({ "value": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_config_writes_require_admin() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let req = test::TestRequest::post()
            .uri("/api/admin/config")
            .set_json(json!({ "key": "banner", "value": "hi" }))
            .to_request();
        assert_eq!(call_status(&app, req).await, StatusCode::UNAUTHORIZED);
    }
}
