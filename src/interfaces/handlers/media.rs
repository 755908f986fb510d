use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        media::{MediaFilter, NewMediaRequest, UpdateMediaRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_media(
    state: web::Data<AppState>,
    query: web::Query<MediaFilter>,
) -> Result<impl Responder, AppError> {
    let items = state.media_handler.list_media(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(items)))
}

#[instrument(skip(state, data))]
pub async fn create_media(
    state: web::Data<AppState>,
    data: web::Json<NewMediaRequest>,
) -> Result<impl Responder, AppError> {
    let media = state.media_handler.create_media(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(media, "Media created")))
}

#[instrument(skip(state))]
pub async fn get_media(
    media_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let media = state.media_handler.get_media(&media_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(media)))
}

#[instrument(skip(state))]
pub async fn record_media_download(
    media_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let count = state.media_handler.record_download(&media_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(count)))
}

#[instrument(skip(state, data))]
pub async fn update_media(
    media_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateMediaRequest>,
) -> Result<impl Responder, AppError> {
    let media = state.media_handler.update_media(&media_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(media, "Media updated")))
}

#[instrument(skip(state))]
pub async fn delete_media(
    media_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.media_handler.delete_media(&media_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Media deleted" })))
}
