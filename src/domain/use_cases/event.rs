use validator::Validate;

use crate::{
    entities::event::{Event, EventFilter, EventInsert, NewEventRequest, UpdateEventRequest, ViewCount},
    errors::AppError,
    repositories::event::EventRepository,
    use_cases::or_not_found,
    utils::valid_id::valid_id,
};

pub struct EventHandler<R>
where
    R: EventRepository,
{
    pub event_repo: R,
}

impl<R> EventHandler<R>
where
    R: EventRepository,
{
    pub fn new(event_repo: R) -> Self {
        EventHandler { event_repo }
    }

    /// Lists events matching the optional category, search term and date filter
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        self.event_repo.list_events(filter).await
    }

    /// Creates an event, deriving its slug from the title when none is given
    pub async fn create_event(&self, request: NewEventRequest) -> Result<Event, AppError> {
        let insert = EventInsert::try_from(request)?;
        self.event_repo.create_event(&insert).await
    }

    /// Returns an event and counts the read as a view
    pub async fn get_event(&self, id: &str) -> Result<Event, AppError> {
        let valid_id = valid_id(id)?;
        self.event_repo
            .increment_event_views(valid_id)
            .await
            .map_err(or_not_found("Event"))
    }

    /// Counts a view without returning the event body
    pub async fn record_view(&self, id: &str) -> Result<ViewCount, AppError> {
        let event = self.get_event(id).await?;
        Ok(ViewCount { id: event.id, views: event.views })
    }

    pub async fn update_event(&self, id: &str, request: &UpdateEventRequest) -> Result<Event, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        if request.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".into()));
        }

        self.event_repo
            .update_event(valid_id, request)
            .await
            .map_err(or_not_found("Event"))
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_id(id)?;
        self.event_repo
            .delete_event(valid_id)
            .await
            .map_err(or_not_found("Event"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::event::MockEventRepository;
    use chrono::{NaiveDate, TimeZone, Utc};
    use mockall::predicate::eq;

    fn event(id: i32, views: i32) -> Event {
        let ts = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        Event {
            id,
            title: "Hackathon 2025".into(),
            slug: "hackathon-2025".into(),
            date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            time: None,
            location: "Hội trường C2".into(),
            description: "24 giờ lập trình".into(),
            excerpt: None,
            image: None,
            category: "competition".into(),
            tags: vec!["hackathon".into()],
            views,
            schedule: None,
            speakers: None,
            registration_link: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[actix_rt::test]
    async fn get_event_goes_through_the_view_counter() {
        let mut repo = MockEventRepository::new();
        repo.expect_increment_event_views()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(event(id, 13)));

        let handler = EventHandler::new(repo);
        let fetched = handler.get_event("7").await.unwrap();

        assert_eq!(fetched.id, 7);
        assert_eq!(fetched.views, 13);
    }

    #[actix_rt::test]
    async fn missing_event_is_reported_by_name() {
        let mut repo = MockEventRepository::new();
        repo.expect_increment_event_views()
            .returning(|_| Err(AppError::NotFound("Record not found".into())));

        let handler = EventHandler::new(repo);
        match handler.get_event("99").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Event not found"),
            other => panic!("expected NotFound, got {:?}", other.map(|e| e.id)),
        }
    }

    #[actix_rt::test]
    async fn malformed_id_never_reaches_the_repository() {
        let mut repo = MockEventRepository::new();
        repo.expect_increment_event_views().times(0);

        let handler = EventHandler::new(repo);
        assert!(matches!(handler.get_event("abc").await, Err(AppError::InvalidInput(_))));
    }

    #[actix_rt::test]
    async fn record_view_returns_only_the_count() {
        let mut repo = MockEventRepository::new();
        repo.expect_increment_event_views().returning(|id| Ok(event(id, 4)));

        let handler = EventHandler::new(repo);
        let count = handler.record_view("2").await.unwrap();
        assert_eq!((count.id, count.views), (2, 4));
    }

    #[actix_rt::test]
    async fn empty_update_is_rejected_before_sql() {
        let mut repo = MockEventRepository::new();
        repo.expect_update_event().times(0);

        let handler = EventHandler::new(repo);
        let result = handler.update_event("1", &UpdateEventRequest::default()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[actix_rt::test]
    async fn invalid_create_request_is_a_validation_error() {
        let mut repo = MockEventRepository::new();
        repo.expect_create_event().times(0);

        let request: NewEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Hi",
            "date": "2025-12-01",
            "location": "Online",
            "description": "Short",
            "category": "talk"
        }))
        .unwrap();

        let handler = EventHandler::new(repo);
        match handler.create_event(request).await {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.iter().any(|e| e.field == "title"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|e| e.id)),
        }
    }
}
