use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::validation::{resolve_slug, validate_link, validate_not_blank, validate_slug, validate_tags},
    infrastructure::db::query::Pagination,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ScheduleItem {
    #[validate(length(min = 1, max = 50))]
    pub time: String,

    #[validate(length(min = 1, max = 300))]
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Speaker {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 150))]
    pub role: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub views: i32,
    pub schedule: Option<Json<Vec<ScheduleItem>>>,
    pub speakers: Option<Json<Vec<Speaker>>>,
    pub registration_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    /// Only events dated today or later.
    #[serde(default)]
    pub upcoming: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl EventFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, per_page: self.per_page }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewEventRequest {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub date: NaiveDate,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(length(max = 500))]
    pub excerpt: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(nested)]
    pub schedule: Option<Vec<ScheduleItem>>,

    #[validate(nested)]
    pub speakers: Option<Vec<Speaker>>,

    #[validate(custom(function = "validate_link"))]
    pub registration_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventInsert {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub schedule: Option<Vec<ScheduleItem>>,
    pub speakers: Option<Vec<Speaker>>,
    pub registration_link: Option<String>,
}

impl TryFrom<NewEventRequest> for EventInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewEventRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = resolve_slug(value.slug.as_deref(), &value.title).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("slug", e);
            errors
        })?;

        Ok(EventInsert {
            title: value.title.trim().to_string(),
            slug,
            date: value.date,
            time: value.time,
            location: value.location,
            description: value.description,
            excerpt: value.excerpt,
            image: value.image,
            category: value.category.trim().to_string(),
            tags: value.tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .collect(),
            schedule: value.schedule,
            speakers: value.speakers,
            registration_link: value.registration_link,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct UpdateEventRequest {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub excerpt: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(nested)]
    pub schedule: Option<Vec<ScheduleItem>>,

    #[validate(nested)]
    pub speakers: Option<Vec<Speaker>>,

    #[validate(custom(function = "validate_link"))]
    pub registration_link: Option<String>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        *self == UpdateEventRequest::default()
    }
}

#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub id: i32,
    pub views: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewEventRequest {
        NewEventRequest {
            title: "Workshop Rust cơ bản".into(),
            slug: None,
            date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            time: Some("18:00 - 20:30".into()),
            location: "Phòng A2-301".into(),
            description: "Giới thiệu ngôn ngữ Rust".into(),
            excerpt: None,
            image: Some("/uploads/events/rust.png".into()),
            category: "workshop".into(),
            tags: Some(vec![" rust ".into(), "systems".into()]),
            schedule: Some(vec![ScheduleItem { time: "18:00".into(), activity: "Check-in".into() }]),
            speakers: None,
            registration_link: Some("https://forms.example.com/rust".into()),
        }
    }

    #[test]
    fn insert_derives_slug_and_trims_tags() {
        let insert = EventInsert::try_from(request()).unwrap();
        assert_eq!(insert.slug, "workshop-rust-co-ban");
        assert_eq!(insert.tags, vec!["rust".to_string(), "systems".to_string()]);
    }

    #[test]
    fn nested_schedule_items_are_validated() {
        let mut req = request();
        req.schedule = Some(vec![ScheduleItem { time: String::new(), activity: "Opening".into() }]);
        assert!(EventInsert::try_from(req).is_err());
    }

    #[test]
    fn bad_registration_link_is_rejected() {
        let mut req = request();
        req.registration_link = Some("ftp://forms.example.com".into());
        let errors = EventInsert::try_from(req).unwrap_err();
        assert!(errors.field_errors().contains_key("registration_link"));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateEventRequest::default().is_empty());
        let update = UpdateEventRequest { location: Some("Hall B".into()), ..Default::default() };
        assert!(!update.is_empty());
    }
}
