//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by every controller and service. It wraps
//! the domain-specific errors of the submodules and implements `IntoResponse`, mapping
//! each variant to a status code and an `ErrorDto` body. Internal failures are logged in
//! full and answered with a generic message.

pub mod auth;
pub mod config;
pub mod internal;
pub mod schema;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        collaborator::{mail::MailError, storage::StorageError},
        error::{
            auth::AuthError, config::ConfigError, internal::InternalError, schema::SchemaError,
            validation::ValidationErrors,
        },
    },
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A schema definition is invalid; raised only while loading schemas at startup.
    #[error(transparent)]
    SchemaErr(#[from] SchemaError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401 / 403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Request body failed schema validation.
    ///
    /// Results in 400 Bad Request carrying every field error.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Database operation error from SeaORM.
    ///
    /// Constraint violations and connection failures are classified by the
    /// `From<DbErr>` conversion before landing here, so this variant is a 500.
    #[error(transparent)]
    DbErr(DbErr),

    /// SQLx database driver error, raised by the session store.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client construction error.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Asset storage collaborator failed; results in 503.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Mail collaborator failed; results in 503.
    #[error(transparent)]
    MailErr(#[from] MailError),

    /// A backing service is unreachable; results in 503.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// A unique field collides with an existing record; results in 409.
    #[error("{0}")]
    Conflict(String),

    /// Resource not found; results in 404.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request; results in 400.
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected internal state with a structured cause.
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Internal server error with custom message.
    ///
    /// The message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Classifies database errors.
///
/// Unique violations become `Conflict` naming the offending column, foreign key
/// violations become `BadRequest`, and connection failures become `Unavailable`.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("{} already exists", conflicting_column(&detail)))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Referenced record does not exist".to_string())
            }
            _ => match err {
                DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                    AppError::Unavailable(err.to_string())
                }
                err => AppError::DbErr(err),
            },
        }
    }
}

/// Extracts `email` from SQLite's `UNIQUE constraint failed: user.email`.
fn conflicting_column(detail: &str) -> &str {
    detail
        .rsplit(['.', ' '])
        .next()
        .filter(|column| !column.is_empty())
        .unwrap_or("record")
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::StorageErr(_) | Self::MailErr(_) | Self::Unavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `Validation` (with field errors) and `BadRequest`
/// - 401 / 403 - `AuthErr`, delegated to `AuthError::into_response()`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - 503 Service Unavailable - collaborator and connection failures, generic message
/// - 500 Internal Server Error - everything else, generic message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::Validation(errors) => {
                tracing::debug!("Rejected request body: {}", errors);
                (
                    status,
                    Json(ErrorDto::with_errors(
                        status,
                        "Validation failed",
                        errors.into_dto(),
                    )),
                )
                    .into_response()
            }
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => {
                (status, Json(ErrorDto::new(status, msg))).into_response()
            }
            Self::StorageErr(_) | Self::MailErr(_) | Self::Unavailable(_) => {
                tracing::warn!("Collaborator unavailable: {}", self);
                (
                    status,
                    Json(ErrorDto::new(
                        status,
                        "Service temporarily unavailable, please try again later",
                    )),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Json(ErrorDto::new(status, "Internal server error"))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_column_from_sqlite_detail() {
        assert_eq!(
            conflicting_column("UNIQUE constraint failed: user.email"),
            "email"
        );
        assert_eq!(conflicting_column(""), "record");
    }

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::NotFound("User not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("email already exists".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::MailErr(MailError::NotConfigured).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::InternalError("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
