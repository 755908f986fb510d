use actix_web::web;

use crate::handlers::{contact, members};

/// Registration and contact forms.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/members")
            .route(web::get().to(members::list_members))
            .route(web::post().to(members::create_member))
    )
    .service(web::resource("/join").route(web::post().to(members::join)))
    .service(web::resource("/contact").route(web::post().to(contact::submit_contact)));
}
