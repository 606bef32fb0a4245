use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of every failed response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub status: u16,
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorDto>,
}

impl ErrorDto {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: error.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        status: StatusCode,
        error: impl Into<String>,
        errors: Vec<FieldErrorDto>,
    ) -> Self {
        Self {
            errors,
            ..Self::new(status, error)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldErrorDto {
    pub message: String,
    pub path: Vec<String>,
}
