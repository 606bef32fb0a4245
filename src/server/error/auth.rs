use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Neither a bearer token nor a session user was presented.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No authenticated user in request")]
    UserNotInSession,

    /// The bearer token does not belong to any user.
    #[error("Bearer token does not match any user")]
    InvalidToken,

    /// The session references a user that no longer exists.
    #[error("User {0} in session not found in database")]
    UserNotInDatabase(i32),

    /// Login attempted with an unknown email or a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The authenticated user lacks a required capability or does not own the record.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level while client-facing messages stay generic:
/// - `AccessDenied` → 403 Forbidden
/// - everything else → 401 Unauthorized
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::AccessDenied(..) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::UserNotInSession | Self::InvalidToken | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (status, Json(ErrorDto::new(status, message))).into_response()
    }
}
