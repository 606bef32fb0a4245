//! Success response envelope.
//!
//! Records enter the body only through `with_record` / `with_records`, which run the
//! projector, so no response path can leak a sensitive field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::server::{
    error::AppError,
    pipeline::{
        projector::{project, project_all},
        record::Record,
    },
};

/// `{status, success: true, <key>: view, ...}`
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    pub fn new(status: StatusCode) -> Self {
        let mut body = Map::new();
        body.insert("status".to_string(), Value::from(status.as_u16()));
        body.insert("success".to_string(), Value::Bool(true));
        Self { status, body }
    }

    /// Envelope holding one projected record under `key`.
    pub fn record<R: Record>(status: StatusCode, key: &str, record: &R) -> Result<Self, AppError> {
        Self::new(status).with_record(key, record)
    }

    /// Envelope holding a list of projected records under `key`.
    pub fn records<R: Record>(
        status: StatusCode,
        key: &str,
        records: &[R],
    ) -> Result<Self, AppError> {
        Self::new(status).with_records(key, records)
    }

    pub fn with_record<R: Record>(mut self, key: &str, record: &R) -> Result<Self, AppError> {
        self.body.insert(key.to_string(), project(record)?.into());
        Ok(self)
    }

    pub fn with_records<R: Record>(mut self, key: &str, records: &[R]) -> Result<Self, AppError> {
        let views = project_all(records)?.into_iter().map(Value::from).collect();
        self.body.insert(key.to_string(), Value::Array(views));
        Ok(self)
    }

    /// Adds a scalar entry such as a session token or a count.
    pub fn with_scalar(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}
