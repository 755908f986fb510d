use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        event::{EventFilter, NewEventRequest, UpdateEventRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_events(
    state: web::Data<AppState>,
    query: web::Query<EventFilter>,
) -> Result<impl Responder, AppError> {
    let events = state.event_handler.list_events(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(events)))
}

#[instrument(skip(state, data))]
pub async fn create_event(
    state: web::Data<AppState>,
    data: web::Json<NewEventRequest>,
) -> Result<impl Responder, AppError> {
    let event = state.event_handler.create_event(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(event, "Event created")))
}

#[instrument(skip(state))]
pub async fn get_event(
    event_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let event = state.event_handler.get_event(&event_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(event)))
}

#[instrument(skip(state))]
pub async fn record_event_view(
    event_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let count = state.event_handler.record_view(&event_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(count)))
}

#[instrument(skip(state, data))]
pub async fn update_event(
    event_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateEventRequest>,
) -> Result<impl Responder, AppError> {
    let event = state.event_handler.update_event(&event_id, &data).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(event, "Event updated")))
}

#[instrument(skip(state))]
pub async fn delete_event(
    event_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.event_handler.delete_event(&event_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Event deleted" })))
}
