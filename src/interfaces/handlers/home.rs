use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Student Club API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": [
            "/api/events",
            "/api/news",
            "/api/media",
            "/api/partners",
            "/api/members",
            "/api/join",
            "/api/contact"
        ],
        "health": "/api/health"
    }))
}
