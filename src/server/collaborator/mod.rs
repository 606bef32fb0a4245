//! External collaborators reached during side effects.
//!
//! Asset storage receives uploaded images and the mailer delivers reply emails. Both
//! sit behind traits so services receive them injected and tests can swap in fakes.
//! When a collaborator is not configured a disabled implementation is installed that
//! fails every call, so misconfiguration surfaces on first use instead of silently
//! dropping work.

pub mod mail;
pub mod storage;
pub mod template;

#[cfg(test)]
pub mod fake;

use std::sync::Arc;

use crate::server::{
    collaborator::{
        mail::{DisabledMailer, HttpMailer, Mailer},
        storage::{AssetStorage, CloudinaryStorage, DisabledStorage},
    },
    config::Config,
    pipeline::dispatcher::SideEffectDispatcher,
};

/// Handles to every collaborator, cloned into each request through `AppState`.
#[derive(Clone)]
pub struct Collaborators {
    pub storage: Arc<dyn AssetStorage>,
    pub mailer: Arc<dyn Mailer>,
}

impl Collaborators {
    pub fn new(storage: Arc<dyn AssetStorage>, mailer: Arc<dyn Mailer>) -> Self {
        Self { storage, mailer }
    }

    /// Builds HTTP-backed collaborators for every configured service.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `client` - Shared HTTP client
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let storage: Arc<dyn AssetStorage> = match &config.cloudinary {
            Some(cloudinary) => Arc::new(CloudinaryStorage::new(
                client.clone(),
                &cloudinary.cloud_name,
                &cloudinary.upload_preset,
            )),
            None => {
                tracing::warn!("Asset storage not configured, uploads will be rejected");
                Arc::new(DisabledStorage)
            }
        };

        let mailer: Arc<dyn Mailer> = match &config.mail {
            Some(mail) => Arc::new(HttpMailer::new(
                client,
                mail.api_url.clone(),
                &mail.api_key,
                &mail.from,
            )),
            None => {
                tracing::warn!("Mail delivery not configured, replies will be rejected");
                Arc::new(DisabledMailer)
            }
        };

        Self { storage, mailer }
    }

    /// Creates a side-effect dispatcher borrowing these collaborators.
    pub fn dispatcher(&self) -> SideEffectDispatcher<'_> {
        SideEffectDispatcher::new(self.storage.as_ref(), self.mailer.as_ref())
    }
}
