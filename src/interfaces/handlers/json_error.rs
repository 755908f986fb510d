use actix_web::{http::StatusCode, HttpResponse};

/// Error envelope for failures raised before a handler runs.
pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error,
        "details": details
    }))
}
