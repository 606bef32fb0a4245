//! In-memory collaborators for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::server::collaborator::{
    mail::{Email, MailError, Mailer},
    storage::{Asset, AssetStorage, StorageError, UploadedAsset},
    Collaborators,
};

/// Accepts every upload and remembers `(file_name, folder)` pairs.
#[derive(Default)]
pub struct RecordingStorage {
    pub uploads: Mutex<Vec<(String, String)>>,
}

impl RecordingStorage {
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AssetStorage for RecordingStorage {
    async fn upload(&self, asset: &Asset, folder: &str) -> Result<UploadedAsset, StorageError> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push((asset.file_name.clone(), folder.to_string()));
        }

        Ok(UploadedAsset {
            url: format!("https://cdn.test/{}/{}", folder, asset.file_name),
            width: 640,
            height: 480,
        })
    }
}

/// Rejects every upload.
pub struct FailingStorage;

#[async_trait]
impl AssetStorage for FailingStorage {
    async fn upload(&self, _asset: &Asset, _folder: &str) -> Result<UploadedAsset, StorageError> {
        Err(StorageError::MalformedResponse("storage offline".to_string()))
    }
}

/// Accepts every email and keeps a copy.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }
        Ok(())
    }
}

/// Rejects every email.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &Email) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Recording collaborators plus handles to inspect them afterwards.
pub fn recording() -> (Collaborators, Arc<RecordingStorage>, Arc<RecordingMailer>) {
    let storage = Arc::new(RecordingStorage::default());
    let mailer = Arc::new(RecordingMailer::default());
    let collaborators = Collaborators::new(storage.clone(), mailer.clone());
    (collaborators, storage, mailer)
}

pub fn failing() -> Collaborators {
    Collaborators::new(Arc::new(FailingStorage), Arc::new(FailingMailer))
}

/// Test image asset.
pub fn image(file_name: &str) -> Asset {
    Asset {
        file_name: file_name.to_string(),
        content_type: Some("image/png".to_string()),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}
