use crate::server::{
    error::AppError,
    pipeline::record::{Record, Repository},
};

/// Resolves a path identifier to a stored record.
pub struct RecordLoader<'a, S: Repository> {
    store: &'a S,
}

impl<'a, S: Repository> RecordLoader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Loads the record identified by `id`.
    ///
    /// # Returns
    /// - `Ok(Record)` - The stored record
    /// - `Err(AppError::NotFound)` - `id` is malformed or no record has it
    /// - `Err(AppError::Unavailable | AppError::DbErr)` - Storage failure
    pub async fn load(&self, id: &str) -> Result<S::Record, AppError> {
        let not_found = || AppError::NotFound(format!("{} not found", S::Record::LABEL));

        let Ok(id) = id.trim().parse::<i32>() else {
            return Err(not_found());
        };

        self.store.find_one(id).await?.ok_or_else(not_found)
    }
}
