use serde::Serialize;

/// Success envelope: `{ "data": ..., "message"?: ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse { data, message: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse { data, message: Some(message.into()) }
    }
}
