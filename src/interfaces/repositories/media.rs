use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::query::{FilteredSelect, SearchTarget, UpdateSet},
    entities::media::{DownloadCount, MediaChanges, MediaFilter, MediaInsert, MediaRow},
    errors::AppError,
    repositories::sqlx_repo::{ensure_affected, SqlxMediaRepo},
};

pub const MEDIA_SEARCH: &[SearchTarget] = &[
    SearchTarget::Text("title"),
    SearchTarget::Text("description"),
    SearchTarget::TextArray("tags"),
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn list_media(&self, filter: &MediaFilter) -> Result<Vec<MediaRow>, AppError>;
    async fn create_media(&self, media: &MediaInsert) -> Result<MediaRow, AppError>;
    /// Reads a row without touching its counters.
    async fn get_media(&self, id: i32) -> Result<MediaRow, AppError>;
    async fn increment_media_views(&self, id: i32) -> Result<MediaRow, AppError>;
    async fn increment_media_downloads(&self, id: i32) -> Result<DownloadCount, AppError>;
    async fn update_media(&self, id: i32, changes: &MediaChanges) -> Result<MediaRow, AppError>;
    async fn delete_media(&self, id: i32) -> Result<(), AppError>;
}

impl SqlxMediaRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxMediaRepo { pool }
    }
}

#[async_trait]
impl MediaRepository for SqlxMediaRepo {
    async fn list_media(&self, filter: &MediaFilter) -> Result<Vec<MediaRow>, AppError> {
        let mut select = FilteredSelect::new("media");
        select
            .eq("type", filter.media_type.map(|t| t.as_str()))
            .eq("category", filter.category.clone().filter(|c| !c.trim().is_empty()))
            .search(filter.search.as_deref(), MEDIA_SEARCH)
            .order_by_desc(&["date", "created_at"])
            .paginate(filter.pagination());

        let mut builder = select.into_builder();
        let rows = builder
            .build_query_as::<MediaRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn create_media(&self, media: &MediaInsert) -> Result<MediaRow, AppError> {
        let columns = &media.columns;

        let row = sqlx::query_as::<_, MediaRow>(
            r#"
            INSERT INTO media (
                type, title, url, thumbnail, category, description, date, time, tags,
                downloads, dimensions, duration, platform, page_count
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(columns.media_type.as_str())
        .bind(&media.title)
        .bind(&media.url)
        .bind(&media.thumbnail)
        .bind(&media.category)
        .bind(&media.description)
        .bind(media.date)
        .bind(&media.time)
        .bind(&media.tags)
        .bind(columns.downloads)
        .bind(&columns.dimensions)
        .bind(&columns.duration)
        .bind(&columns.platform)
        .bind(columns.page_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_media(&self, id: i32) -> Result<MediaRow, AppError> {
        let row = sqlx::query_as::<_, MediaRow>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn increment_media_views(&self, id: i32) -> Result<MediaRow, AppError> {
        let row = sqlx::query_as::<_, MediaRow>(
            "UPDATE media SET views = COALESCE(views, 0) + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn increment_media_downloads(&self, id: i32) -> Result<DownloadCount, AppError> {
        let count = sqlx::query_as::<_, DownloadCount>(
            r#"
            UPDATE media SET downloads = COALESCE(downloads, 0) + 1
            WHERE id = $1 AND type <> 'video'
            RETURNING id, downloads
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_media(&self, id: i32, changes: &MediaChanges) -> Result<MediaRow, AppError> {
        let fields = &changes.fields;

        let mut update = UpdateSet::new("media");
        update
            .set("title", fields.title.as_deref().map(|t| t.trim().to_string()))
            .set("url", fields.url.clone())
            .set("thumbnail", fields.thumbnail.clone())
            .set("category", fields.category.as_deref().map(|c| c.trim().to_string()))
            .set("description", fields.description.clone())
            .set("date", fields.date)
            .set("time", fields.time.clone())
            .set("tags", fields.tags.clone());

        // Type-specific columns are rewritten as a set so a type change
        // clears the columns of the previous type.
        if let Some(columns) = &changes.columns {
            update
                .set("type", Some(columns.media_type.as_str()))
                .set("downloads", Some(columns.downloads))
                .set("dimensions", Some(columns.dimensions.clone()))
                .set("duration", Some(columns.duration.clone()))
                .set("platform", Some(columns.platform.clone()))
                .set("page_count", Some(columns.page_count));
        }

        let Some(mut builder) = update.finish(id) else {
            return Err(AppError::InvalidInput("No fields to update".into()));
        };

        let row = builder
            .build_query_as::<MediaRow>()
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete_media(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result, "Media")
    }
}
