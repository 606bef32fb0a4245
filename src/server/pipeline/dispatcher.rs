use serde_json::Value;

use crate::server::{
    collaborator::{
        mail::Mailer,
        storage::{Asset, AssetStorage},
        template,
    },
    error::AppError,
    model::image::Image,
    pipeline::{
        patch::{Patch, PatchValue},
        record::{MergePolicy, Record},
    },
};

/// Runs the side effects a patch asks for and rewrites the patch with their results.
pub struct SideEffectDispatcher<'a> {
    storage: &'a dyn AssetStorage,
    mailer: &'a dyn Mailer,
}

impl<'a> SideEffectDispatcher<'a> {
    pub fn new(storage: &'a dyn AssetStorage, mailer: &'a dyn Mailer) -> Self {
        Self { storage, mailer }
    }

    /// Resolves effect-backed entries of `patch` against `record`.
    ///
    /// Assets on `Upload` fields are uploaded and replaced by a `Set` of the image
    /// descriptor. Strings on `Notify` fields are emailed to the record's reply context
    /// and turned into a `Push`. Other entries pass through untouched. Effects run in
    /// field order and are awaited one by one.
    ///
    /// # Returns
    /// - `Ok(Patch)` - Patch with every effect resolved
    /// - `Err(AppError::StorageErr | AppError::MailErr)` - A collaborator failed; nothing
    ///   has been written, so the stored record is unchanged
    /// - `Err(AppError::BadRequest)` - A notify field was patched on a record with nobody
    ///   to notify
    pub async fn dispatch<R: Record>(&self, record: &R, patch: Patch) -> Result<Patch, AppError> {
        let mut resolved = Patch::new();

        for (field, value) in patch {
            let value = match (R::policy(&field), value) {
                (Some(MergePolicy::Upload { folder }), PatchValue::Asset(asset)) => {
                    let uploaded = self.storage.upload(&asset, folder).await?;
                    tracing::debug!("Uploaded {} for {} {}", field, R::LABEL, record.id());

                    PatchValue::Set(Value::from(Image::from(uploaded)))
                }
                (Some(MergePolicy::Notify), PatchValue::Set(Value::String(body))) => {
                    let Some(context) = record.reply_context() else {
                        return Err(AppError::BadRequest(format!(
                            "{} has no recipient to notify",
                            R::LABEL
                        )));
                    };

                    let email = template::reply_email(&context, &body);
                    self.mailer.send(&email).await?;
                    tracing::info!("Sent {} reply for {} {}", field, R::LABEL, record.id());

                    PatchValue::Push(Value::String(body))
                }
                (_, value) => value,
            };

            resolved.insert(field, value);
        }

        Ok(resolved)
    }

    /// Uploads an asset for a record that is about to be created.
    ///
    /// The folder is taken from `R`'s upload policy for `field`.
    ///
    /// # Returns
    /// - `Ok(Image)` - Descriptor of the stored asset
    /// - `Err(AppError::StorageErr)` - The storage collaborator failed
    /// - `Err(AppError::InternalError)` - `field` is not an upload field of `R`
    pub async fn upload_new<R: Record>(&self, field: &str, asset: &Asset) -> Result<Image, AppError> {
        let Some(MergePolicy::Upload { folder }) = R::policy(field) else {
            return Err(AppError::InternalError(format!(
                "{} has no upload field '{}'",
                R::LABEL,
                field
            )));
        };

        let uploaded = self.storage.upload(asset, folder).await?;
        tracing::debug!("Uploaded {} for new {}", field, R::LABEL);

        Ok(Image::from(uploaded))
    }
}
