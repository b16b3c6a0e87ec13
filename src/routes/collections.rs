use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthAdmin;
use crate::models::collection::{MoveRequest, OrderedRecord, ReorderRequest};
use crate::models::{FaqItem, PhotoCarousel, Service, Specialty, Testimonial};
use crate::services::CollectionService;
use crate::AppState;

/// `GET /api/<kind>` for every collection kind.
pub fn create_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(public_kind::<Testimonial>)
        .configure(public_kind::<FaqItem>)
        .configure(public_kind::<Service>)
        .configure(public_kind::<PhotoCarousel>)
        .configure(public_kind::<Specialty>);
}

/// Admin CRUD and ordering routes for every collection kind.
pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(admin_kind::<Testimonial>)
        .configure(admin_kind::<FaqItem>)
        .configure(admin_kind::<Service>)
        .configure(admin_kind::<PhotoCarousel>)
        .configure(admin_kind::<Specialty>);
}

fn public_kind<T: OrderedRecord>(cfg: &mut web::ServiceConfig) {
    cfg.route(&format!("/{}", T::PATH), web::get().to(list_active::<T>));
}

fn admin_kind<T: OrderedRecord>(cfg: &mut web::ServiceConfig) {
    // `reorder` is registered ahead of `{id}` so it is not parsed as an id
    cfg.service(
        web::resource(format!("/{}", T::PATH))
            .route(web::get().to(list_all::<T>))
            .route(web::post().to(create::<T>)),
    )
    .service(web::resource(format!("/{}/reorder", T::PATH)).route(web::put().to(reorder::<T>)))
    .service(
        web::resource(format!("/{}/{{id}}", T::PATH))
            .route(web::get().to(get_by_id::<T>))
            .route(web::put().to(update::<T>))
            .route(web::delete().to(delete::<T>)),
    )
    .service(
        web::resource(format!("/{}/{{id}}/move", T::PATH)).route(web::post().to(move_item::<T>)),
    );
}

async fn list_active<T: OrderedRecord>(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let records = CollectionService::<T>::new(&state.db).get_active().await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn list_all<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
) -> AppResult<HttpResponse> {
    let records = CollectionService::<T>::new(&state.db).get_all().await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn get_by_id<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let record = CollectionService::<T>::new(&state.db)
        .get_by_id(id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", T::LABEL)))?;

    Ok(HttpResponse::Ok().json(record))
}

async fn create<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    form_data: web::Json<T::Form>,
) -> AppResult<HttpResponse> {
    let record = CollectionService::<T>::new(&state.db)
        .create(form_data.into_inner())
        .await?;

    tracing::info!("Created {} {}", T::LABEL, record.id());
    Ok(HttpResponse::Ok().json(record))
}

async fn update<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    id: web::Path<i64>,
    patch: web::Json<T::Patch>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let record = CollectionService::<T>::new(&state.db)
        .update(id, patch.into_inner())
        .await?;

    tracing::debug!("Updated {} {}", T::LABEL, id);
    Ok(HttpResponse::Ok().json(record))
}

async fn delete<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    CollectionService::<T>::new(&state.db).delete(id).await?;

    tracing::info!("Deleted {} {}", T::LABEL, id);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

async fn reorder<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    form_data: web::Json<ReorderRequest>,
) -> AppResult<HttpResponse> {
    let records = CollectionService::<T>::new(&state.db)
        .reorder(&form_data.ids)
        .await?;

    tracing::debug!("Reordered {} {} records", records.len(), T::PATH);
    Ok(HttpResponse::Ok().json(records))
}

async fn move_item<T: OrderedRecord>(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    id: web::Path<i64>,
    form_data: web::Json<MoveRequest>,
) -> AppResult<HttpResponse> {
    let records = CollectionService::<T>::new(&state.db)
        .move_item(id.into_inner(), form_data.position)
        .await?;

    Ok(HttpResponse::Ok().json(records))
}
