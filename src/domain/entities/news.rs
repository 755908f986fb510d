use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{
    entities::validation::{resolve_slug, validate_link, validate_not_blank, validate_slug, validate_tags},
    infrastructure::db::query::Pagination,
    utils::{html::sanitize_html, string_array::{parse_string_array, stringify_array}},
};

/// Row as stored: tags comma-joined, author spread over three columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub author_image: Option<String>,
    pub views: i32,
    pub likes: i32,
    pub comments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct NewsAuthor {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 100))]
    pub role: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsArticle {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: Option<NewsAuthor>,
    pub views: i32,
    pub likes: i32,
    pub comments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsRow> for NewsArticle {
    fn from(row: NewsRow) -> Self {
        let author = row.author_name.map(|name| NewsAuthor {
            name,
            role: row.author_role,
            image: row.author_image,
        });

        NewsArticle {
            id: row.id,
            title: row.title,
            slug: row.slug,
            date: row.date,
            time: row.time,
            image: row.image,
            excerpt: row.excerpt,
            content: row.content,
            category: row.category,
            tags: parse_string_array(row.tags.as_deref()),
            author,
            views: row.views,
            likes: row.likes,
            comments: row.comments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NewsFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl NewsFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, per_page: self.per_page }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewNewsRequest {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub date: NaiveDate,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,

    #[validate(length(max = 500))]
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(nested)]
    pub author: Option<NewsAuthor>,
}

/// Column values ready for `INSERT INTO news`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsInsert {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub author_image: Option<String>,
}

impl TryFrom<NewNewsRequest> for NewsInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewNewsRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = resolve_slug(value.slug.as_deref(), &value.title).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("slug", e);
            errors
        })?;

        let (author_name, author_role, author_image) = match value.author {
            Some(author) => (Some(author.name), author.role, author.image),
            None => (None, None, None),
        };

        Ok(NewsInsert {
            title: value.title.trim().to_string(),
            slug,
            date: value.date,
            time: value.time,
            image: value.image,
            excerpt: value.excerpt,
            content: sanitize_html(&value.content),
            category: value.category.trim().to_string(),
            tags: value.tags.as_deref().and_then(stringify_array),
            author_name,
            author_role,
            author_image,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub image: Option<String>,

    #[validate(length(max = 500))]
    pub excerpt: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(nested)]
    pub author: Option<NewsAuthor>,
}

impl UpdateNewsRequest {
    pub fn is_empty(&self) -> bool {
        *self == UpdateNewsRequest::default()
    }

    /// Sanitizes replacement content before it is written.
    pub fn normalized(mut self) -> Self {
        self.content = self.content.as_deref().map(sanitize_html);
        self
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct LikeCount {
    pub id: i32,
    pub likes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> NewsRow {
        let ts = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();
        NewsRow {
            id: 3,
            title: "Kết quả Hackathon".into(),
            slug: "ket-qua-hackathon".into(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            time: None,
            image: None,
            excerpt: None,
            content: "<p>Chúc mừng các đội</p>".into(),
            category: "announcement".into(),
            tags: Some("hackathon,award".into()),
            author_name: Some("Ban Truyền thông".into()),
            author_role: Some("Editor".into()),
            author_image: None,
            views: 10,
            likes: 2,
            comments: 0,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn view_model_splits_tags_and_embeds_author() {
        let article = NewsArticle::from(row());
        assert_eq!(article.tags, vec!["hackathon".to_string(), "award".to_string()]);
        assert_eq!(article.author.as_ref().map(|a| a.name.as_str()), Some("Ban Truyền thông"));
    }

    #[test]
    fn missing_author_name_means_no_author() {
        let mut row = row();
        row.author_name = None;
        row.tags = None;
        let article = NewsArticle::from(row);
        assert!(article.author.is_none());
        assert!(article.tags.is_empty());
    }

    #[test]
    fn insert_joins_tags_and_sanitizes_content() {
        let request = NewNewsRequest {
            title: "Tuyển thành viên mới".into(),
            slug: None,
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            time: None,
            image: None,
            excerpt: None,
            content: "<p>Đăng ký ngay</p><script>alert(1)</script>".into(),
            category: "recruitment".into(),
            tags: Some(vec!["tuyen-thanh-vien".into(), "2025".into()]),
            author: None,
        };

        let insert = NewsInsert::try_from(request).unwrap();
        assert_eq!(insert.tags.as_deref(), Some("tuyen-thanh-vien,2025"));
        assert_eq!(insert.content, "<p>Đăng ký ngay</p>");
        assert_eq!(insert.slug, "tuyen-thanh-vien-moi");
    }
}
