use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

/// A file received in a multipart request, not yet uploaded anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where an uploaded asset ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
    pub url: String,
    pub width: i32,
    pub height: i32,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Asset storage is not configured")]
    NotConfigured,

    #[error("Asset upload failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Asset storage returned an unusable response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Uploads `asset` into `folder` and returns its public location.
    async fn upload(&self, asset: &Asset, folder: &str) -> Result<UploadedAsset, StorageError>;
}

/// Unsigned uploads to a Cloudinary compatible image API.
pub struct CloudinaryStorage {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct CloudinaryResponse {
    secure_url: Option<String>,
    url: Option<String>,
    width: i32,
    height: i32,
}

impl CloudinaryStorage {
    pub fn new(client: reqwest::Client, cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            client,
            endpoint: format!("https://api.cloudinary.com/v1_1/{}/image/upload", cloud_name),
            upload_preset: upload_preset.to_string(),
        }
    }
}

#[async_trait]
impl AssetStorage for CloudinaryStorage {
    async fn upload(&self, asset: &Asset, folder: &str) -> Result<UploadedAsset, StorageError> {
        let mut part = Part::bytes(asset.bytes.clone()).file_name(asset.file_name.clone());
        if let Some(content_type) = &asset.content_type {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string())
            .part("file", part);

        let response: CloudinaryResponse = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let url = response
            .secure_url
            .or(response.url)
            .ok_or_else(|| StorageError::MalformedResponse("missing url".to_string()))?;

        tracing::debug!("Uploaded {} to {}", asset.file_name, url);

        Ok(UploadedAsset {
            url,
            width: response.width,
            height: response.height,
        })
    }
}

/// Installed when no storage credentials are configured.
pub struct DisabledStorage;

#[async_trait]
impl AssetStorage for DisabledStorage {
    async fn upload(&self, _asset: &Asset, _folder: &str) -> Result<UploadedAsset, StorageError> {
        Err(StorageError::NotConfigured)
    }
}
