use serde::Serialize;
use thiserror::Error;

use crate::model::api::FieldErrorDto;

/// A single rule violation produced by the schema validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub message: String,
    /// Field name followed by nested keys, e.g. `["categories", "action"]`.
    pub path: Vec<String>,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: vec![field.to_string()],
        }
    }

    pub fn nested(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// First path element, the top-level field the error belongs to.
    pub fn field(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }
}

/// Every violation found in one request body. Never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", self.messages().join(", "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn into_dto(self) -> Vec<FieldErrorDto> {
        self.0
            .into_iter()
            .map(|e| FieldErrorDto {
                message: e.message,
                path: e.path,
            })
            .collect()
    }
}
