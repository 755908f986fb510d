use actix_web::web;

use crate::handlers::media;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/media")
            .service(
                web::resource("")
                    .route(web::get().to(media::list_media))
                    .route(web::post().to(media::create_media))
            )
            .service(
                web::resource("/{media_id}")
                    .route(web::get().to(media::get_media))
                    .route(web::post().to(media::record_media_download))
                    .route(web::put().to(media::update_media))
                    .route(web::delete().to(media::delete_media))
            )
    );
}
