pub mod contact;
pub mod event;
pub mod media;
pub mod news;
pub mod partner;
pub mod registration;

use crate::errors::AppError;

/// Replaces the generic "Record not found" with a message naming `what`.
pub(crate) fn or_not_found(what: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::NotFound(_) => AppError::NotFound(format!("{} not found", what)),
        other => other,
    }
}
