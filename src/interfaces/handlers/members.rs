use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        member::{JoinRequest, MemberFilter},
        response::ApiResponse,
    },
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

const JOIN_SUCCESS: &str = "Registration received. Welcome to the club!";

/// Public membership form. Limited per client address.
#[instrument(skip(req, state, data))]
pub async fn join(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<JoinRequest>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_proxy);
    state.form_limiter.check(&format!("join:ip:{}", client_ip))?;

    let member = state.registration_handler.register(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(member, JOIN_SUCCESS)))
}

#[instrument(skip(state))]
pub async fn list_members(
    state: web::Data<AppState>,
    query: web::Query<MemberFilter>,
) -> Result<impl Responder, AppError> {
    let members = state.registration_handler.list_members(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(members)))
}

#[instrument(skip(state, data))]
pub async fn create_member(
    state: web::Data<AppState>,
    data: web::Json<JoinRequest>,
) -> Result<impl Responder, AppError> {
    let member = state.registration_handler.register(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(member, "Member created")))
}
