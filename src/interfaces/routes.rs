use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod events;
mod json_error;
mod media;
mod members;
mod news;
mod partners;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(health_check)
            .configure(events::config_routes)
            .configure(news::config_routes)
            .configure(media::config_routes)
            .configure(partners::config_routes)
            .configure(members::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
