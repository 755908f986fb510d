use actix_web::web;

use crate::handlers::events;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .service(
                web::resource("")
                    .route(web::get().to(events::list_events))
                    .route(web::post().to(events::create_event))
            )
            .service(
                web::resource("/{event_id}")
                    .route(web::get().to(events::get_event))
                    .route(web::post().to(events::record_event_view))
                    .route(web::put().to(events::update_event))
                    .route(web::delete().to(events::delete_event))
            )
    );
}
