use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::StreamExt;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthAdmin;
use crate::models::site_config::{HeroImage, SettingKey};
use crate::services::upload::{is_image, validate_upload_type};
use crate::services::{SiteConfigService, UploadService};
use crate::AppState;

/// Upload type whose image also becomes the `hero_image` config entry.
const HERO_UPLOAD_TYPE: &str = "hero";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    image_path: String,
    filename: String,
}

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload/{type}", web::post().to(upload_image));
}

async fn upload_image(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    upload_type: web::Path<String>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let upload_type = upload_type.into_inner();
    validate_upload_type(&upload_type)?;

    let max_size = state.config.max_upload_size;
    let mut image: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let content_disposition = field.content_disposition();
        let field_name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or("");
        if field_name != "image" {
            continue;
        }

        if !is_image(field.content_type()) {
            return Err(AppError::BadRequest(
                "Only image files are allowed".to_string(),
            ));
        }

        let filename = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::BadRequest(format!("Chunk error: {}", e)))?;
            if data.len() + chunk.len() > max_size {
                return Err(AppError::BadRequest(format!(
                    "Image exceeds the {} byte limit",
                    max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        image = Some((filename, data));
        break;
    }

    let (filename, data) =
        image.ok_or_else(|| AppError::BadRequest("No image uploaded".to_string()))?;

    let uploads = UploadService::new(&state.config.upload_dir);
    let stored = uploads
        .save_image(&upload_type, filename.as_deref(), &data)
        .await?;

    if upload_type == HERO_UPLOAD_TYPE {
        // The file must not outlive a failed config write
        if let Err(e) = record_hero_image(&state, &stored.image_path).await {
            uploads.remove_image(&upload_type, &stored.filename).await;
            return Err(e);
        }
    }

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        image_path: stored.image_path,
        filename: stored.filename,
    }))
}

async fn record_hero_image(state: &AppState, image_path: &str) -> AppResult<()> {
    let hero = HeroImage::new(image_path);
    let value = serde_json::to_value(&hero)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode hero image: {}", e)))?;
    SiteConfigService::new(&state.db)
        .upsert(SettingKey::HeroImage.as_str(), &value)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::services::SiteConfigService;
    use crate::test_utils::{init_app, TestContext};
    use actix_web::{http::header, http::StatusCode, test};
    use serde_json::{json, Value};

    const BOUNDARY: &str = "----site-cms-test-boundary";

    fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(uri: &str, token: &str, body: Vec<u8>) -> actix_http::Request {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request()
    }

    fn files_in(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[actix_web::test]
    async fn test_hero_upload_updates_config() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let body = multipart_body("image", "Hero.PNG", "image/png", b"\x89PNG\r\n\x1a\nfake");
        let req = upload_request("/api/admin/upload/hero", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("image-") && filename.ends_with(".png"));
        let image_path = body["imagePath"].as_str().unwrap();
        assert_eq!(image_path, format!("/uploads/hero/{}", filename));
        assert!(ctx.upload_dir().join("hero").join(filename).exists());

        let hero = SiteConfigService::new(&ctx.state.db)
            .get_value("hero_image")
            .await
            .unwrap();
        assert_eq!(hero, Some(json!({ "path": image_path })));

        // Uploaded files are served statically
        let req = test::TestRequest::get().uri(image_path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_other_types_have_no_side_effect() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let body = multipart_body("image", "ana.jpg", "image/jpeg", b"jpeg-bytes");
        let req = upload_request("/api/admin/upload/testimonials", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert_eq!(files_in(&ctx.upload_dir().join("testimonials")), 1);
        let service = SiteConfigService::new(&ctx.state.db);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_hero_file_removed_when_config_write_fails() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;
        sqlx::query("DROP TABLE site_config")
            .execute(&ctx.state.db.pool)
            .await
            .unwrap();

        let body = multipart_body("image", "hero.png", "image/png", b"png-bytes");
        let req = upload_request("/api/admin/upload/hero", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(files_in(&ctx.upload_dir().join("hero")), 0);
    }

    #[actix_web::test]
    async fn test_non_image_rejected_before_write() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let body = multipart_body("image", "notes.txt", "text/plain", b"hello");
        let req = upload_request("/api/admin/upload/hero", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert_eq!(files_in(&ctx.upload_dir().join("hero")), 0);
        let hero = SiteConfigService::new(&ctx.state.db)
            .get_value("hero_image")
            .await
            .unwrap();
        assert!(hero.is_none());
    }

    #[actix_web::test]
    async fn test_oversize_rejected() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let data = vec![0u8; ctx.state.config.max_upload_size + 1];
        let body = multipart_body("image", "big.png", "image/png", &data);
        let req = upload_request("/api/admin/upload/hero", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(files_in(&ctx.upload_dir().join("hero")), 0);
    }

    #[actix_web::test]
    async fn test_bad_type_and_missing_field() {
        let ctx = TestContext::new().await;
        let app = init_app(&ctx).await;

        let body = multipart_body("image", "a.png", "image/png", b"png");
        let req = upload_request("/api/admin/upload/bad.type", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = multipart_body("file", "a.png", "image/png", b"png");
        let req = upload_request("/api/admin/upload/hero", &ctx.admin_token(), body);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "No image uploaded" }));
    }
}
