use thiserror::Error;

/// A schema definition that cannot be used to validate requests.
///
/// Raised by `SchemaBuilder::build`; the server refuses to start when any schema fails.
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },

    #[error("Schema '{schema}' field '{field}' references unknown field '{reference}'")]
    UnknownReference {
        schema: String,
        field: String,
        reference: String,
    },

    #[error("Schema '{schema}' field '{field}' has a default of the wrong type")]
    DefaultTypeMismatch { schema: String, field: String },

    #[error("Schema '{schema}' field '{field}' is required and cannot have a default")]
    RequiredWithDefault { schema: String, field: String },
}
