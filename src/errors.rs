use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Registrant column whose uniqueness was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DuplicateField {
    #[display("email")]
    Email,

    #[display("ma_sinh_vien")]
    StudentId,
}

impl DuplicateField {
    /// Machine-readable discriminator sent as `errorType`.
    pub fn error_type(&self) -> &'static str {
        match self {
            DuplicateField::Email => "duplicate_email",
            DuplicateField::StudentId => "duplicate_ma_sinh_vien",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DuplicateField::Email => "This email address is already registered",
            DuplicateField::StudentId => "This student ID is already registered",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    Duplicate(DuplicateField),
    NotFound(String),
    Conflict(String),
    RateLimited { retry_after: u64 },
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Duplicate(field) => write!(f, "Duplicate {}", field),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::RateLimited { retry_after } => write!(f, "Rate limited, retry after {}s", retry_after),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::Duplicate(field) => {
                serde_json::json!({
                    "error": field.message(),
                    "errorType": field.error_type(),
                    "details": [FieldError {
                        field: field.to_string(),
                        message: field.message().to_string(),
                    }]
                })
            }
            AppError::RateLimited { retry_after } => {
                serde_json::json!({
                    "error": "Too many submissions. Please try again later.",
                    "details": { "retry_after": retry_after }
                })
            }
            AppError::InternalError(cause) => {
                // The cause stays in the logs only.
                tracing::error!(%cause, "Request failed");
                serde_json::json!({"error": "Internal server error"})
            }
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => serde_json::json!({"error": msg}),
        };

        let mut response = HttpResponse::build(self.status_code());
        if let AppError::RateLimited { retry_after } = self {
            response.insert_header((header::RETRY_AFTER, retry_after.to_string()));
        }
        response
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        collect_field_errors("", &errors, &mut field_errors);
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

/// Flattens nested struct/list errors into dotted paths such as `schedule[0].time`.
fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23514")) => {
                AppError::InvalidInput("Value rejected by a database check".into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_codes_follow_error_taxonomy() {
        assert_eq!(AppError::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Duplicate(DuplicateField::Email).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("event".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::RateLimited { retry_after: 3 }.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(AppError::InternalError("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn duplicate_reports_which_field_collided() {
        let body = body_json(AppError::Duplicate(DuplicateField::StudentId)).await;
        assert_eq!(body["errorType"], "duplicate_ma_sinh_vien");
        assert_eq!(body["details"][0]["field"], "ma_sinh_vien");

        let body = body_json(AppError::Duplicate(DuplicateField::Email)).await;
        assert_eq!(body["errorType"], "duplicate_email");
    }

    #[actix_rt::test]
    async fn internal_errors_hide_their_cause() {
        let body = body_json(AppError::InternalError("password authentication failed".into())).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
