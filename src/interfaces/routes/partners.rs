use actix_web::web;

use crate::handlers::partners;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partners")
            .service(
                web::resource("")
                    .route(web::get().to(partners::list_partners))
                    .route(web::post().to(partners::create_partner))
            )
            .service(
                web::resource("/{partner_id}")
                    .route(web::get().to(partners::get_partner))
                    .route(web::put().to(partners::update_partner))
                    .route(web::delete().to(partners::delete_partner))
            )
    );
}
