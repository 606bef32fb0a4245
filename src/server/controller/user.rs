use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{page::Page, user::UserFilter},
    service::user::UserService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

/// Lists users, optionally filtered by role.
///
/// # Access Control
/// - `Admin`
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(filter): Query<UserFilter>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let (users, total) = UserService::new(&state.db, &state.collaborators)
        .list(filter, page)
        .await?;

    Ok(Envelope::records(StatusCode::OK, "users", &users)?.with_scalar("total", total))
}

/// Public profile of a user.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db, &state.collaborators)
        .get(&id)
        .await?;

    Envelope::record(StatusCode::OK, "user", &user)
}

/// Updates a profile from JSON or multipart input with an optional `profile_pic`.
///
/// # Access Control
/// - The user themself, or `Admin`
///
/// # Returns
/// - `200 OK` - `{user}`
/// - `400 Bad Request` - Validation failed
/// - `409 Conflict` - Username or email taken
/// - `503 Service Unavailable` - Upload failed; the profile is unchanged
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require_self_or_admin(&id)
        .await?;

    let input = state.schemas.profile.validate(&input)?;
    let user = UserService::new(&state.db, &state.collaborators)
        .update(&id, input)
        .await?;

    Envelope::record(StatusCode::OK, "user", &user)
}

/// Deletes an account.
///
/// # Access Control
/// - The user themself, or `Admin`
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require_self_or_admin(&id)
        .await?;

    let user = UserService::new(&state.db, &state.collaborators)
        .delete(&id)
        .await?;

    Envelope::record(StatusCode::OK, "user", &user)
}

/// Marks a user as verified, granting write access.
///
/// # Access Control
/// - `Admin`
pub async fn verify_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db, &state.collaborators)
        .verify(&id)
        .await?;

    Envelope::record(StatusCode::OK, "user", &user)
}
