use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::validation::{validate_link, validate_list_entries, validate_not_blank, validate_url},
    errors::AppError,
    infrastructure::db::query::Pagination,
    utils::string_array::{parse_string_array, stringify_array},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    Academic,
    Business,
    Community,
    Government,
    Technology,
}

impl PartnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerType::Academic => "academic",
            PartnerType::Business => "business",
            PartnerType::Community => "community",
            PartnerType::Government => "government",
            PartnerType::Technology => "technology",
        }
    }
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnerType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "academic" => Ok(PartnerType::Academic),
            "business" => Ok(PartnerType::Business),
            "community" => Ok(PartnerType::Community),
            "government" => Ok(PartnerType::Government),
            "technology" => Ok(PartnerType::Technology),
            other => Err(AppError::InvalidInput(format!("Unknown partner type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Active => "active",
            PartnerStatus::Inactive => "inactive",
            PartnerStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PartnerStatus::Active),
            "inactive" => Ok(PartnerStatus::Inactive),
            "pending" => Ok(PartnerStatus::Pending),
            other => Err(AppError::InvalidInput(format!("Unknown partner status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartnerRow {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    #[sqlx(rename = "type")]
    pub partner_type: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub achievements: Option<String>,
    pub collaboration: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Partner {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: PartnerType,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub achievements: Vec<String>,
    pub collaboration: Vec<String>,
    pub status: PartnerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PartnerRow> for Partner {
    type Error = AppError;

    fn try_from(row: PartnerRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, value: &str| {
            AppError::InternalError(format!("partner {} has unknown {} '{}'", row.id, what, value))
        };
        let partner_type = row
            .partner_type
            .parse::<PartnerType>()
            .map_err(|_| corrupt("type", &row.partner_type))?;
        let status = row
            .status
            .parse::<PartnerStatus>()
            .map_err(|_| corrupt("status", &row.status))?;

        Ok(Partner {
            id: row.id,
            name: row.name,
            logo: row.logo,
            partner_type,
            description: row.description,
            website: row.website,
            email: row.email,
            phone: row.phone,
            address: row.address,
            achievements: parse_string_array(row.achievements.as_deref()),
            collaboration: parse_string_array(row.collaboration.as_deref()),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartnerFilter {
    #[serde(rename = "type")]
    pub partner_type: Option<PartnerType>,
    pub status: Option<PartnerStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PartnerFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, per_page: self.per_page }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewPartnerRequest {
    #[validate(length(min = 2, max = 150), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(custom(function = "validate_link"))]
    pub logo: Option<String>,

    #[serde(rename = "type")]
    pub partner_type: PartnerType,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub website: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 300))]
    pub address: Option<String>,

    #[validate(length(max = 20), custom(function = "validate_list_entries"))]
    pub achievements: Option<Vec<String>>,

    #[validate(length(max = 20), custom(function = "validate_list_entries"))]
    pub collaboration: Option<Vec<String>>,

    pub status: Option<PartnerStatus>,
}

/// Column values ready for `INSERT INTO partners`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerInsert {
    pub name: String,
    pub logo: Option<String>,
    pub partner_type: PartnerType,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub achievements: Option<String>,
    pub collaboration: Option<String>,
    pub status: PartnerStatus,
}

impl From<NewPartnerRequest> for PartnerInsert {
    fn from(value: NewPartnerRequest) -> Self {
        PartnerInsert {
            name: value.name.trim().to_string(),
            logo: value.logo,
            partner_type: value.partner_type,
            description: value.description,
            website: value.website,
            email: value.email.map(|e| e.trim().to_lowercase()),
            phone: value.phone,
            address: value.address,
            achievements: value.achievements.as_deref().and_then(stringify_array),
            collaboration: value.collaboration.as_deref().and_then(stringify_array),
            status: value.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 2, max = 150), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub logo: Option<String>,

    #[serde(rename = "type")]
    pub partner_type: Option<PartnerType>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub website: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 300))]
    pub address: Option<String>,

    #[validate(length(max = 20), custom(function = "validate_list_entries"))]
    pub achievements: Option<Vec<String>>,

    #[validate(length(max = 20), custom(function = "validate_list_entries"))]
    pub collaboration: Option<Vec<String>>,

    pub status: Option<PartnerStatus>,
}

impl UpdatePartnerRequest {
    pub fn is_empty(&self) -> bool {
        *self == UpdatePartnerRequest::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> PartnerRow {
        let ts = Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap();
        PartnerRow {
            id: 2,
            name: "FPT Software".into(),
            logo: None,
            partner_type: "business".into(),
            description: None,
            website: Some("https://fpt-software.com".into()),
            email: None,
            phone: None,
            address: None,
            achievements: Some("Tài trợ Hackathon 2024, Học bổng".into()),
            collaboration: None,
            status: "active".into(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn row_lists_are_split_and_enums_parsed() {
        let partner = Partner::try_from(row()).unwrap();
        assert_eq!(partner.partner_type, PartnerType::Business);
        assert_eq!(partner.status, PartnerStatus::Active);
        assert_eq!(partner.achievements, vec!["Tài trợ Hackathon 2024".to_string(), "Học bổng".to_string()]);
        assert!(partner.collaboration.is_empty());
    }

    #[test]
    fn unknown_status_in_storage_is_internal() {
        let mut row = row();
        row.status = "archived".into();
        assert!(matches!(Partner::try_from(row), Err(AppError::InternalError(_))));
    }

    #[test]
    fn request_type_must_be_known() {
        let result = serde_json::from_value::<NewPartnerRequest>(serde_json::json!({
            "name": "Some Org",
            "type": "charity"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn list_entries_with_commas_are_rejected() {
        let request: NewPartnerRequest = serde_json::from_value(serde_json::json!({
            "name": "ICPC Vietnam",
            "type": "academic",
            "achievements": ["Gold medal, ICPC Asia 2024"]
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("achievements"));

        let update = UpdatePartnerRequest {
            collaboration: Some(vec!["Workshop".into(), "".into()]),
            ..Default::default()
        };
        assert!(update.validate().unwrap_err().field_errors().contains_key("collaboration"));
    }

    #[test]
    fn insert_defaults_status_and_joins_lists() {
        let request: NewPartnerRequest = serde_json::from_value(serde_json::json!({
            "name": "  Đại học Bách khoa ",
            "type": "academic",
            "email": "Contact@HUST.edu.vn",
            "collaboration": ["Workshop", " Cuộc thi "]
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let insert = PartnerInsert::from(request);
        assert_eq!(insert.name, "Đại học Bách khoa");
        assert_eq!(insert.status, PartnerStatus::Active);
        assert_eq!(insert.email.as_deref(), Some("contact@hust.edu.vn"));
        assert_eq!(insert.collaboration.as_deref(), Some("Workshop,Cuộc thi"));
        assert_eq!(insert.achievements, None);
    }
}
