use crate::errors::AppError;

/// Parses a path segment as a positive row id.
pub fn valid_id(raw: &str) -> Result<i32, AppError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidInput(format!("Invalid id: {}", raw))),
    }
}
