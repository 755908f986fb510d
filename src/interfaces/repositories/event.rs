use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::{
    db::query::{FilteredSelect, SearchTarget, UpdateSet},
    entities::event::{Event, EventFilter, EventInsert, UpdateEventRequest},
    errors::AppError,
    repositories::sqlx_repo::{ensure_affected, slug_conflict, SqlxEventRepo},
};

/// Columns the `search` parameter is matched against.
pub const EVENT_SEARCH: &[SearchTarget] = &[
    SearchTarget::Text("title"),
    SearchTarget::Text("description"),
    SearchTarget::Text("excerpt"),
    SearchTarget::TextArray("tags"),
];

const SLUG_CONSTRAINT: &str = "events_slug_key";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError>;
    /// Bumps `views` and returns the updated row.
    async fn increment_event_views(&self, id: i32) -> Result<Event, AppError>;
    async fn update_event(&self, id: i32, event: &UpdateEventRequest) -> Result<Event, AppError>;
    async fn delete_event(&self, id: i32) -> Result<(), AppError>;
}

impl SqlxEventRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxEventRepo { pool }
    }
}

fn trimmed(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| t.trim().to_string()).collect()
}

#[async_trait]
impl EventRepository for SqlxEventRepo {
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut select = FilteredSelect::new("events");
        select
            .eq("category", filter.category.clone().filter(|c| !c.trim().is_empty()))
            .condition(filter.upcoming, "date >= CURRENT_DATE")
            .search(filter.search.as_deref(), EVENT_SEARCH)
            .order_by_desc(&["date", "created_at"])
            .paginate(filter.pagination());

        let mut builder = select.into_builder();
        let events = builder
            .build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError> {
        let created = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                title, slug, date, time, location, description, excerpt, image,
                category, tags, schedule, speakers, registration_link
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&event.title)
        .bind(&event.slug)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.excerpt)
        .bind(&event.image)
        .bind(&event.category)
        .bind(&event.tags)
        .bind(event.schedule.clone().map(Json))
        .bind(event.speakers.clone().map(Json))
        .bind(&event.registration_link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_conflict(e, SLUG_CONSTRAINT))?;

        Ok(created)
    }

    async fn increment_event_views(&self, id: i32) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET views = COALESCE(views, 0) + 1
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update_event(&self, id: i32, event: &UpdateEventRequest) -> Result<Event, AppError> {
        let mut update = UpdateSet::new("events");
        update
            .set("title", event.title.as_deref().map(|t| t.trim().to_string()))
            .set("slug", event.slug.clone())
            .set("date", event.date)
            .set("time", event.time.clone())
            .set("location", event.location.clone())
            .set("description", event.description.clone())
            .set("excerpt", event.excerpt.clone())
            .set("image", event.image.clone())
            .set("category", event.category.as_deref().map(|c| c.trim().to_string()))
            .set("tags", event.tags.as_deref().map(trimmed))
            .set("schedule", event.schedule.clone().map(Json))
            .set("speakers", event.speakers.clone().map(Json))
            .set("registration_link", event.registration_link.clone());

        let Some(mut builder) = update.finish(id) else {
            return Err(AppError::InvalidInput("No fields to update".into()));
        };

        let updated = builder
            .build_query_as::<Event>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| slug_conflict(e, SLUG_CONSTRAINT))?;

        Ok(updated)
    }

    async fn delete_event(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result, "Event")
    }
}
