use actix_web::web;

use crate::handlers::news;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/news")
            .service(
                web::resource("")
                    .route(web::get().to(news::list_news))
                    .route(web::post().to(news::create_news))
            )
            .service(
                web::resource("/{news_id}")
                    .route(web::get().to(news::get_news))
                    .route(web::put().to(news::update_news))
                    .route(web::delete().to(news::delete_news))
            )
            .service(
                web::resource("/{news_id}/like")
                    .route(web::post().to(news::like_news))
            )
    );
}
