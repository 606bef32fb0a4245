use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A domain record could not be converted to or from its JSON form.
    ///
    /// Happens when a patch writes a value of the wrong shape into a field.
    #[error("Failed to convert {record} record: {source}")]
    RecordConversion {
        /// Record label, e.g. `User`
        record: &'static str,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A raw asset reached the field mutator without being uploaded first.
    #[error("Unresolved asset for field '{0}'")]
    UnresolvedAsset(String),

    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}
