//! The validated partial-update pipeline shared by every content service.
//!
//! A request body is checked by a [`schema::Schema`], the target is fetched by the
//! [`loader::RecordLoader`], effect-backed fields are resolved by the
//! [`dispatcher::SideEffectDispatcher`], the [`mutator::FieldMutator`] applies the
//! patch under the record's merge policies, the repository commits, and the
//! [`projector`] strips sensitive fields on the way out.

pub mod dispatcher;
pub mod loader;
pub mod mutator;
pub mod patch;
pub mod projector;
pub mod record;
pub mod schema;
pub mod schemas;

#[cfg(test)]
mod test;

use crate::server::{
    error::AppError,
    pipeline::{
        dispatcher::SideEffectDispatcher,
        loader::RecordLoader,
        mutator::{FieldMutator, Mutation},
        patch::Patch,
        record::{Record, Repository},
    },
};

/// Load, resolve effects, mutate and commit one record.
pub struct UpdatePipeline<'a, S: Repository> {
    store: &'a S,
    dispatcher: SideEffectDispatcher<'a>,
}

impl<'a, S: Repository> UpdatePipeline<'a, S> {
    pub fn new(store: &'a S, dispatcher: SideEffectDispatcher<'a>) -> Self {
        Self { store, dispatcher }
    }

    /// Loads the record identified by `id` and applies `patch` to it.
    pub async fn run(&self, id: &str, patch: Patch) -> Result<S::Record, AppError> {
        let current = RecordLoader::new(self.store).load(id).await?;
        self.apply(&current, patch).await
    }

    /// Applies `patch` to an already loaded record.
    ///
    /// Side effects complete before anything is written; when one fails the stored
    /// record is left as it was. A patch that changes nothing skips the commit.
    ///
    /// # Returns
    /// - `Ok(Record)` - The record as stored after the update
    /// - `Err(AppError)` - Side effect, conversion or storage failure
    pub async fn apply(&self, current: &S::Record, patch: Patch) -> Result<S::Record, AppError> {
        let mutation = self.prepare(current, patch).await?;

        if mutation.is_unchanged() {
            tracing::debug!("No changes for {} {}", S::Record::LABEL, current.id());
            return Ok(mutation.record);
        }

        tracing::debug!(
            "Saving {} {} with changed fields {:?}",
            S::Record::LABEL,
            current.id(),
            mutation.changed
        );

        Ok(self.store.save(&mutation).await?)
    }

    /// Runs the side effects and applies `patch` without committing.
    ///
    /// For callers that commit the mutation together with other writes.
    pub async fn prepare(
        &self,
        current: &S::Record,
        patch: Patch,
    ) -> Result<Mutation<S::Record>, AppError> {
        let resolved = self.dispatcher.dispatch(current, patch).await?;
        FieldMutator::apply(current, resolved)
    }
}
