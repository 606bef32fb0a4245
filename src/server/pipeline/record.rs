use async_trait::async_trait;
use sea_orm::DbErr;
use serde::{de::DeserializeOwned, Serialize};

use crate::server::pipeline::mutator::Mutation;

/// How the field mutator treats a patch entry for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Overwritten by `Set`.
    Replace,
    /// A set of values changed through `Add` / `Remove`; `Set` replaces the whole set.
    AppendSet,
    /// Fixed once the record exists; patches are ignored.
    Immutable,
    /// Maintained by persistence or dedicated operations; patches are ignored.
    Computed,
    /// Accepts a raw asset which the dispatcher uploads into `folder` first.
    Upload { folder: &'static str },
    /// Accepts a message which the dispatcher emails before it is appended to a thread.
    Notify,
}

/// Recipient of a notify side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyContext {
    pub name: String,
    pub email: String,
    pub subject: String,
}

/// A domain record the update pipeline can load, patch and project.
///
/// The serde representation doubles as the mutation surface: field names in `POLICIES`
/// and `SENSITIVE` are the serialized keys.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Human readable kind used in messages, e.g. `"User"`.
    const LABEL: &'static str;

    /// Fields removed by the projector from every outward view.
    const SENSITIVE: &'static [&'static str] = &[];

    /// Per-field merge policy. Fields missing here cannot be patched.
    const POLICIES: &'static [(&'static str, MergePolicy)];

    fn id(&self) -> i32;

    fn policy(field: &str) -> Option<MergePolicy> {
        Self::POLICIES
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, policy)| *policy)
    }

    /// Who receives notify side effects for this record, if anyone.
    fn reply_context(&self) -> Option<ReplyContext> {
        None
    }
}

/// Persistence collaborator for one record kind.
#[async_trait]
pub trait Repository: Send + Sync {
    type Record: Record;

    async fn find_one(&self, id: i32) -> Result<Option<Self::Record>, DbErr>;

    /// Commits a mutation in one transaction and returns the stored state, with
    /// `updated_at` refreshed.
    ///
    /// Only columns of changed fields are written. Collection fields are written
    /// through their item edits, so items committed by other requests since the
    /// record was loaded are kept.
    async fn save(&self, mutation: &Mutation<Self::Record>) -> Result<Self::Record, DbErr>;

    /// Deletes the record, returning what was removed.
    async fn delete_one(&self, id: i32) -> Result<Option<Self::Record>, DbErr>;
}
