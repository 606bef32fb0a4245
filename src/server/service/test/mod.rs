use serde_json::json;

use crate::server::{
    collaborator::fake,
    error::AppError,
    pipeline::{schema::Normalized, schemas::Schemas},
    util::form::FormInput,
};
use test_utils::{builder::TestBuilder, factory};

mod user;

/// Validates a JSON body against one of the request schemas, as a controller would.
fn validate(
    schema: impl Fn(&Schemas) -> &crate::server::pipeline::schema::Schema,
    body: serde_json::Value,
) -> Result<Normalized, AppError> {
    let schemas = Schemas::load()?;
    Ok(schema(&schemas).validate(&FormInput::from_json(body))?)
}

/// Validates a JSON body plus one uploaded file.
fn validate_with_asset(
    schema: impl Fn(&Schemas) -> &crate::server::pipeline::schema::Schema,
    body: serde_json::Value,
    field: &str,
    file_name: &str,
) -> Result<Normalized, AppError> {
    let schemas = Schemas::load()?;
    let input = FormInput::from_json(body).with_asset(field, fake::image(file_name));
    Ok(schema(&schemas).validate(&input)?)
}

/// Loads the domain user for a factory row.
async fn load_user(
    db: &sea_orm::DatabaseConnection,
    model: &entity::user::Model,
) -> Result<crate::server::model::user::User, AppError> {
    crate::server::data::user::UserRepository::new(db)
        .find_by_id(model.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
