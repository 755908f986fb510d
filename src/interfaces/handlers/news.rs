use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        news::{NewNewsRequest, NewsFilter, UpdateNewsRequest},
        response::ApiResponse,
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_news(
    state: web::Data<AppState>,
    query: web::Query<NewsFilter>,
) -> Result<impl Responder, AppError> {
    let articles = state.news_handler.list_news(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(articles)))
}

#[instrument(skip(state, data))]
pub async fn create_news(
    state: web::Data<AppState>,
    data: web::Json<NewNewsRequest>,
) -> Result<impl Responder, AppError> {
    let article = state.news_handler.create_news(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(article, "Article created")))
}

#[instrument(skip(state))]
pub async fn get_news(
    news_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let article = state.news_handler.get_news(&news_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(article)))
}

#[instrument(skip(state))]
pub async fn like_news(
    news_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let likes = state.news_handler.like_news(&news_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(likes)))
}

#[instrument(skip(state, data))]
pub async fn update_news(
    news_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateNewsRequest>,
) -> Result<impl Responder, AppError> {
    let article = state.news_handler.update_news(&news_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(article, "Article updated")))
}

#[instrument(skip(state))]
pub async fn delete_news(
    news_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.news_handler.delete_news(&news_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Article deleted" })))
}
