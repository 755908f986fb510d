use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        partner::{NewPartnerRequest, PartnerFilter, UpdatePartnerRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_partners(
    state: web::Data<AppState>,
    query: web::Query<PartnerFilter>,
) -> Result<impl Responder, AppError> {
    let partners = state.partner_handler.list_partners(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(partners)))
}

#[instrument(skip(state, data))]
pub async fn create_partner(
    state: web::Data<AppState>,
    data: web::Json<NewPartnerRequest>,
) -> Result<impl Responder, AppError> {
    let partner = state.partner_handler.create_partner(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(partner, "Partner created")))
}

#[instrument(skip(state))]
pub async fn get_partner(
    partner_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let partner = state.partner_handler.get_partner(&partner_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(partner)))
}

#[instrument(skip(state, data))]
pub async fn update_partner(
    partner_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePartnerRequest>,
) -> Result<impl Responder, AppError> {
    let partner = state.partner_handler.update_partner(&partner_id, &data).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(partner, "Partner updated")))
}

#[instrument(skip(state))]
pub async fn delete_partner(
    partner_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.partner_handler.delete_partner(&partner_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Partner deleted" })))
}
