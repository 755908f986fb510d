use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{contact::ContactForm, response::ApiResponse},
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

#[instrument(skip(req, state, form))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_proxy);
    state.form_limiter.check(&format!("contact:ip:{}", client_ip))?;

    // Encoded so arbitrary input cannot collide with other key prefixes.
    let email_key = format!("contact:email:{}", urlencoding::encode(&form.normalized_email()));
    state.form_limiter.check(&email_key)?;

    let receipt = state.contact_handler.submit(form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(receipt)))
}
