use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::validation::{new_validation_error, validate_not_blank},
    infrastructure::db::query::Pagination,
};

static STUDENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("student id pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9 ]+$").expect("phone pattern"));

/// A registered club member (sinh viên).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i32,
    pub ho_ten: String,
    pub ma_sinh_vien: String,
    pub email: String,
    pub so_dien_thoai: String,
    pub truong: String,
    pub khoa: String,
    pub nam_hoc: i32,
    pub linh_vuc_quan_tam: Vec<String>,
    pub ban: String,
    pub ly_do: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_student_id(value: &str) -> Result<(), ValidationError> {
    if STUDENT_ID.is_match(value) {
        Ok(())
    } else {
        Err(new_validation_error(
            "invalid_student_id",
            "Student ID may only contain letters and digits",
        ))
    }
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err(new_validation_error(
            "invalid_phone",
            "Phone number may only contain digits, spaces and a leading +",
        ))
    }
}

fn validate_interests(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty() || v.chars().count() > 100) {
        return Err(new_validation_error(
            "invalid_interest",
            "Interests must be non-empty and at most 100 characters",
        ));
    }
    Ok(())
}

/// Payload of the membership form, shared by `/api/join` and `/api/members`.
/// Missing fields deserialize as empty so every one of them is reported by
/// `validate()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct JoinRequest {
    #[validate(
        length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub ho_ten: String,

    #[validate(
        length(min = 4, max = 20, message = "Student ID must be between 4 and 20 characters"),
        custom(function = "validate_student_id")
    )]
    pub ma_sinh_vien: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(
        length(min = 8, max = 15, message = "Phone number must be between 8 and 15 characters"),
        custom(function = "validate_phone")
    )]
    pub so_dien_thoai: String,

    #[validate(length(min = 1, max = 200, message = "School is required"))]
    pub truong: String,

    #[validate(length(min = 1, max = 200, message = "Faculty is required"))]
    pub khoa: String,

    #[validate(range(min = 1, max = 8, message = "Year of study must be between 1 and 8"))]
    pub nam_hoc: i32,

    #[validate(
        length(max = 10, message = "At most 10 interests can be selected"),
        custom(function = "validate_interests")
    )]
    pub linh_vuc_quan_tam: Vec<String>,

    #[validate(
        length(min = 1, max = 100, message = "Division is required"),
        custom(function = "validate_not_blank")
    )]
    pub ban: String,

    #[validate(length(max = 2000, message = "Motivation must be at most 2000 characters"))]
    pub ly_do: Option<String>,
}

impl JoinRequest {
    /// Strips surrounding whitespace; run before `validate()`.
    pub fn trimmed(self) -> Self {
        let trim = |v: String| v.trim().to_string();
        JoinRequest {
            ho_ten: trim(self.ho_ten),
            ma_sinh_vien: trim(self.ma_sinh_vien),
            email: trim(self.email),
            so_dien_thoai: trim(self.so_dien_thoai),
            truong: trim(self.truong),
            khoa: trim(self.khoa),
            nam_hoc: self.nam_hoc,
            linh_vuc_quan_tam: self.linh_vuc_quan_tam.into_iter().map(trim).collect(),
            ban: trim(self.ban),
            ly_do: self.ly_do.map(trim).filter(|v| !v.is_empty()),
        }
    }
}

/// Column values ready for `INSERT INTO members`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInsert {
    pub ho_ten: String,
    pub ma_sinh_vien: String,
    pub email: String,
    pub so_dien_thoai: String,
    pub truong: String,
    pub khoa: String,
    pub nam_hoc: i32,
    pub linh_vuc_quan_tam: Vec<String>,
    pub ban: String,
    pub ly_do: Option<String>,
}

impl From<JoinRequest> for MemberInsert {
    /// Expects a trimmed request. Student ids are stored upper-cased and
    /// emails lower-cased, so the unique constraints catch case variants of
    /// the same registrant.
    fn from(value: JoinRequest) -> Self {
        MemberInsert {
            ho_ten: value.ho_ten,
            ma_sinh_vien: value.ma_sinh_vien.to_uppercase(),
            email: value.email.to_lowercase(),
            so_dien_thoai: value.so_dien_thoai,
            truong: value.truong,
            khoa: value.khoa,
            nam_hoc: value.nam_hoc,
            linh_vuc_quan_tam: value.linh_vuc_quan_tam,
            ban: value.ban,
            ly_do: value.ly_do,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MemberFilter {
    pub ban: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl MemberFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, per_page: self.per_page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> JoinRequest {
        JoinRequest {
            ho_ten: "Nguyen Van A".into(),
            ma_sinh_vien: "SV12345".into(),
            email: "a@x.com".into(),
            so_dien_thoai: "+84 912 345 678".into(),
            truong: "Đại học Bách khoa Hà Nội".into(),
            khoa: "Công nghệ Thông tin".into(),
            nam_hoc: 2,
            linh_vuc_quan_tam: vec!["Web".into(), "AI".into()],
            ban: "Ban Kỹ thuật".into(),
            ly_do: Some("Muốn học hỏi".into()),
        }
    }

    fn failing_fields(request: &JoinRequest) -> Vec<String> {
        let mut fields: Vec<String> = request
            .validate()
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn student_id_must_be_alphanumeric() {
        let mut request = valid_request();
        request.ma_sinh_vien = "SV-123".into();
        assert_eq!(failing_fields(&request), vec!["ma_sinh_vien"]);
    }

    #[test]
    fn phone_allows_only_digits_spaces_and_plus() {
        let mut request = valid_request();
        request.so_dien_thoai = "0912-345-678".into();
        assert_eq!(failing_fields(&request), vec!["so_dien_thoai"]);

        request.so_dien_thoai = "0912345678".into();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn reports_every_failing_field() {
        let mut request = valid_request();
        request.ho_ten = "A".into();
        request.email = "not-an-email".into();
        request.nam_hoc = 9;
        request.linh_vuc_quan_tam = (0..11).map(|i| format!("topic-{i}")).collect();

        assert_eq!(
            failing_fields(&request),
            vec!["email", "ho_ten", "linh_vuc_quan_tam", "nam_hoc"]
        );
    }

    #[test]
    fn blank_division_is_rejected() {
        let mut request = valid_request();
        request.ban = "   ".into();
        assert_eq!(failing_fields(&request), vec!["ban"]);
    }

    #[test]
    fn insert_normalizes_identity_fields() {
        let mut request = valid_request();
        request.email = " A@X.com ".into();
        request.ma_sinh_vien = "sv12345".into();
        request.ly_do = Some("   ".into());

        let insert = MemberInsert::from(request.trimmed());
        assert_eq!(insert.email, "a@x.com");
        assert_eq!(insert.ma_sinh_vien, "SV12345");
        assert_eq!(insert.ly_do, None);
    }

    #[test]
    fn padded_student_id_is_valid_once_trimmed() {
        let mut request = valid_request();
        request.ma_sinh_vien = " SV12345 ".into();
        request.so_dien_thoai = " 0912345678 ".into();
        assert!(request.validate().is_err());

        let request = request.trimmed();
        assert!(request.validate().is_ok());
        assert_eq!(request.ma_sinh_vien, "SV12345");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let request: JoinRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "ma_sinh_vien": "SV12345"
        }))
        .unwrap();

        assert_eq!(
            failing_fields(&request),
            vec!["ban", "ho_ten", "khoa", "nam_hoc", "so_dien_thoai", "truong"]
        );
    }
}
