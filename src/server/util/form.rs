//! Request body extraction.
//!
//! Write endpoints accept JSON objects, urlencoded forms or `multipart/form-data`.
//! Every shape is reduced to a `FormInput` so the schema validator sees one format.
//! Multipart file parts become assets; every other value is kept as received.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::server::{collaborator::storage::Asset, error::AppError};

/// Raw request body, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub fields: Map<String, Value>,
    pub assets: BTreeMap<String, Asset>,
}

impl FormInput {
    /// Builds an input from a JSON object literal, as a JSON request would produce.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                fields,
                assets: BTreeMap::new(),
            },
            _ => Self::default(),
        }
    }

    pub fn with_asset(mut self, field: impl Into<String>, asset: Asset) -> Self {
        self.assets.insert(field.into(), asset);
        self
    }
}

impl<S: Send + Sync> FromRequest<S> for FormInput {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return read_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let fields = pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            return Ok(Self {
                fields,
                assets: BTreeMap::new(),
            });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(fields)) => Ok(Self {
                fields,
                assets: BTreeMap::new(),
            }),
            Ok(_) => Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            )),
            Err(e) => Err(AppError::BadRequest(format!("Invalid JSON body: {}", e))),
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormInput, AppError> {
    let mut input = FormInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                // Browsers send an empty part for untouched file inputs.
                if bytes.is_empty() {
                    continue;
                }

                input.assets.insert(
                    name,
                    Asset {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                input.fields.insert(name, Value::String(text));
            }
        }
    }

    Ok(input)
}
