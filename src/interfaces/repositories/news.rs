use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::query::{FilteredSelect, SearchTarget, UpdateSet},
    entities::news::{LikeCount, NewsFilter, NewsInsert, NewsRow, UpdateNewsRequest},
    errors::AppError,
    repositories::sqlx_repo::{ensure_affected, slug_conflict, SqlxNewsRepo},
    utils::string_array::stringify_array,
};

/// `news.tags` is comma-joined text, so it is matched as plain text.
pub const NEWS_SEARCH: &[SearchTarget] = &[
    SearchTarget::Text("title"),
    SearchTarget::Text("excerpt"),
    SearchTarget::Text("content"),
    SearchTarget::Text("tags"),
];

const SLUG_CONSTRAINT: &str = "news_slug_key";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsRow>, AppError>;
    async fn create_news(&self, news: &NewsInsert) -> Result<NewsRow, AppError>;
    async fn increment_news_views(&self, id: i32) -> Result<NewsRow, AppError>;
    async fn increment_news_likes(&self, id: i32) -> Result<LikeCount, AppError>;
    async fn update_news(&self, id: i32, news: &UpdateNewsRequest) -> Result<NewsRow, AppError>;
    async fn delete_news(&self, id: i32) -> Result<(), AppError>;
}

impl SqlxNewsRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxNewsRepo { pool }
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepo {
    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsRow>, AppError> {
        let mut select = FilteredSelect::new("news");
        select
            .eq("category", filter.category.clone().filter(|c| !c.trim().is_empty()))
            .search(filter.search.as_deref(), NEWS_SEARCH)
            .order_by_desc(&["date", "created_at"])
            .paginate(filter.pagination());

        let mut builder = select.into_builder();
        let rows = builder
            .build_query_as::<NewsRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn create_news(&self, news: &NewsInsert) -> Result<NewsRow, AppError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            INSERT INTO news (
                title, slug, date, time, image, excerpt, content, category, tags,
                author_name, author_role, author_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&news.title)
        .bind(&news.slug)
        .bind(news.date)
        .bind(&news.time)
        .bind(&news.image)
        .bind(&news.excerpt)
        .bind(&news.content)
        .bind(&news.category)
        .bind(&news.tags)
        .bind(&news.author_name)
        .bind(&news.author_role)
        .bind(&news.author_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(e, SLUG_CONSTRAINT))?;

        Ok(row)
    }

    async fn increment_news_views(&self, id: i32) -> Result<NewsRow, AppError> {
        let row = sqlx::query_as::<_, NewsRow>(
            "UPDATE news SET views = COALESCE(views, 0) + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn increment_news_likes(&self, id: i32) -> Result<LikeCount, AppError> {
        let likes = sqlx::query_as::<_, LikeCount>(
            "UPDATE news SET likes = COALESCE(likes, 0) + 1 WHERE id = $1 RETURNING id, likes",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn update_news(&self, id: i32, news: &UpdateNewsRequest) -> Result<NewsRow, AppError> {
        let author = news.author.as_ref();

        let mut update = UpdateSet::new("news");
        update
            .set("title", news.title.as_deref().map(|t| t.trim().to_string()))
            .set("slug", news.slug.clone())
            .set("date", news.date)
            .set("time", news.time.clone())
            .set("image", news.image.clone())
            .set("excerpt", news.excerpt.clone())
            .set("content", news.content.clone())
            .set("category", news.category.as_deref().map(|c| c.trim().to_string()))
            // An empty list clears the column.
            .set("tags", news.tags.as_deref().map(stringify_array))
            .set("author_name", author.map(|a| a.name.clone()))
            .set("author_role", author.map(|a| a.role.clone()))
            .set("author_image", author.map(|a| a.image.clone()));

        let Some(mut builder) = update.finish(id) else {
            return Err(AppError::InvalidInput("No fields to update".into()));
        };

        let row = builder
            .build_query_as::<NewsRow>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| slug_conflict(e, SLUG_CONSTRAINT))?;

        Ok(row)
    }

    async fn delete_news(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result, "News article")
    }
}
