use std::path::Path;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App,
};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::Database;
use crate::routes::create_routes;
use crate::services::AdminService;
use crate::utils::auth::create_jwt;
use crate::AppState;

pub const TEST_ADMIN_PASSWORD: &str = "password123";

/// In-memory database with a seeded `admin` account and a private upload
/// directory.
pub struct TestContext {
    pub state: web::Data<AppState>,
    upload_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();

        let config = Config {
            jwt_secret: "test-secret".to_string(),
            upload_dir: upload_dir.path().to_path_buf(),
            admin_password: Some(TEST_ADMIN_PASSWORD.to_string()),
            ..Config::default()
        };
        AdminService::new(&db).ensure_seeded(&config).await.unwrap();

        TestContext {
            state: web::Data::new(AppState { db, config }),
            upload_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Token for the seeded admin (id 1).
    pub fn admin_token(&self) -> String {
        create_jwt(1, &self.state.config.jwt_secret, "1h").unwrap()
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let config = ctx.state.config.clone();
    test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(|cfg| create_routes(cfg, &config)),
    )
    .await
}

/// Status a client would see. Errors raised by middleware surface as `Err`
/// from the test service and are rendered here the way the server renders them.
pub async fn call_status<S, B>(app: &S, req: Request) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}
