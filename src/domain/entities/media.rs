use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::validation::{new_validation_error, validate_link, validate_not_blank, validate_tags},
    errors::AppError,
    infrastructure::db::query::Pagination,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Document,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Document => "document",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "document" => Ok(MediaType::Document),
            other => Err(AppError::InvalidInput(format!("Unknown media type: {}", other))),
        }
    }
}

/// Type-specific part of a media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaDetails {
    Image {
        #[serde(default)]
        downloads: i32,
        #[serde(default)]
        dimensions: String,
    },
    Video {
        #[serde(default)]
        duration: String,
        #[serde(default)]
        platform: String,
    },
    Document {
        #[serde(default)]
        downloads: i32,
        #[serde(default)]
        page_count: i32,
    },
}

impl MediaDetails {
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaDetails::Image { .. } => MediaType::Image,
            MediaDetails::Video { .. } => MediaType::Video,
            MediaDetails::Document { .. } => MediaType::Document,
        }
    }

    /// Applies a partial update. Values from the current variant are kept only
    /// when the type does not change.
    pub fn merged(&self, patch: &MediaDetailsPatch) -> MediaDetails {
        let target = patch.media_type.unwrap_or_else(|| self.media_type());
        let base = if target == self.media_type() {
            MediaColumns::from(self)
        } else {
            MediaColumns::empty(target)
        };

        MediaDetails::from(MediaColumns {
            media_type: target,
            downloads: patch.downloads.or(base.downloads),
            dimensions: patch.dimensions.clone().or(base.dimensions),
            duration: patch.duration.clone().or(base.duration),
            platform: patch.platform.clone().or(base.platform),
            page_count: patch.page_count.or(base.page_count),
        })
    }
}

/// The type-specific columns of the `media` table. Columns that do not
/// belong to `media_type` are `None` (NULL).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaColumns {
    pub media_type: MediaType,
    pub downloads: Option<i32>,
    pub dimensions: Option<String>,
    pub duration: Option<String>,
    pub platform: Option<String>,
    pub page_count: Option<i32>,
}

impl MediaColumns {
    pub fn empty(media_type: MediaType) -> Self {
        MediaColumns {
            media_type,
            downloads: None,
            dimensions: None,
            duration: None,
            platform: None,
            page_count: None,
        }
    }
}

impl From<&MediaDetails> for MediaColumns {
    fn from(details: &MediaDetails) -> Self {
        let mut columns = MediaColumns::empty(details.media_type());
        match details {
            MediaDetails::Image { downloads, dimensions } => {
                columns.downloads = Some(*downloads);
                columns.dimensions = Some(dimensions.clone());
            }
            MediaDetails::Video { duration, platform } => {
                columns.duration = Some(duration.clone());
                columns.platform = Some(platform.clone());
            }
            MediaDetails::Document { downloads, page_count } => {
                columns.downloads = Some(*downloads);
                columns.page_count = Some(*page_count);
            }
        }
        columns
    }
}

impl From<MediaColumns> for MediaDetails {
    fn from(columns: MediaColumns) -> Self {
        match columns.media_type {
            MediaType::Image => MediaDetails::Image {
                downloads: columns.downloads.unwrap_or(0),
                dimensions: columns.dimensions.unwrap_or_default(),
            },
            MediaType::Video => MediaDetails::Video {
                duration: columns.duration.unwrap_or_default(),
                platform: columns.platform.unwrap_or_default(),
            },
            MediaType::Document => MediaDetails::Document {
                downloads: columns.downloads.unwrap_or(0),
                page_count: columns.page_count.unwrap_or(0),
            },
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaRow {
    pub id: i32,
    #[sqlx(rename = "type")]
    pub media_type: String,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub views: i32,
    pub tags: Vec<String>,
    pub downloads: Option<i32>,
    pub dimensions: Option<String>,
    pub duration: Option<String>,
    pub platform: Option<String>,
    pub page_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Media {
    pub id: i32,
    #[serde(flatten)]
    pub details: MediaDetails,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub views: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MediaRow> for Media {
    type Error = AppError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let media_type = row.media_type.parse::<MediaType>().map_err(|_| {
            AppError::InternalError(format!("media {} has unknown type '{}'", row.id, row.media_type))
        })?;

        let details = MediaDetails::from(MediaColumns {
            media_type,
            downloads: row.downloads,
            dimensions: row.dimensions,
            duration: row.duration,
            platform: row.platform,
            page_count: row.page_count,
        });

        Ok(Media {
            id: row.id,
            details,
            title: row.title,
            url: row.url,
            thumbnail: row.thumbnail,
            category: row.category,
            description: row.description,
            date: row.date,
            time: row.time,
            views: row.views,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MediaFilter {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl MediaFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, per_page: self.per_page }
    }
}

fn validate_media_details(details: &MediaDetails) -> Result<(), ValidationError> {
    match details {
        MediaDetails::Image { downloads, .. } | MediaDetails::Document { downloads, .. } if *downloads < 0 => {
            Err(new_validation_error("negative_downloads", "Downloads cannot be negative"))
        }
        MediaDetails::Document { page_count, .. } if *page_count < 0 => {
            Err(new_validation_error("negative_page_count", "Page count cannot be negative"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewMediaRequest {
    #[serde(flatten)]
    #[validate(custom(function = "validate_media_details"))]
    pub details: MediaDetails,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_link"))]
    pub url: String,

    #[validate(custom(function = "validate_link"))]
    pub thumbnail: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
}

/// Column values ready for `INSERT INTO media`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInsert {
    pub columns: MediaColumns,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub tags: Vec<String>,
}

impl From<NewMediaRequest> for MediaInsert {
    fn from(value: NewMediaRequest) -> Self {
        MediaInsert {
            columns: MediaColumns::from(&value.details),
            title: value.title.trim().to_string(),
            url: value.url,
            thumbnail: value.thumbnail,
            category: value.category.trim().to_string(),
            description: value.description,
            date: value.date.unwrap_or_else(|| Utc::now().date_naive()),
            time: value.time,
            tags: value
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .collect(),
        }
    }
}

/// Type-specific fields of a partial update.
#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct MediaDetailsPatch {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,

    #[validate(range(min = 0))]
    pub downloads: Option<i32>,

    #[validate(length(max = 50))]
    pub dimensions: Option<String>,

    #[validate(length(max = 50))]
    pub duration: Option<String>,

    #[validate(length(max = 50))]
    pub platform: Option<String>,

    #[validate(range(min = 0))]
    pub page_count: Option<i32>,
}

impl MediaDetailsPatch {
    pub fn is_empty(&self) -> bool {
        *self == MediaDetailsPatch::default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct UpdateMediaRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub details: MediaDetailsPatch,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub url: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub thumbnail: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub time: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
}

impl UpdateMediaRequest {
    pub fn is_empty(&self) -> bool {
        *self == UpdateMediaRequest::default()
    }
}

/// A resolved update: shared fields as sent, plus the full set of
/// type-specific columns when any of them changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaChanges {
    pub fields: UpdateMediaRequest,
    pub columns: Option<MediaColumns>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DownloadCount {
    pub id: i32,
    pub downloads: i32,
}
