use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    service::comment::CommentService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentService::new(&state.db, &state.collaborators)
        .get(&id)
        .await?;

    Envelope::record(StatusCode::OK, "comment", &comment)
}

/// Edits a comment. Admins may also set `read`.
///
/// # Access Control
/// - The author, or `Admin`
pub async fn update_comment(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Read])
        .await?;

    let schema = if user.is_admin() {
        &state.schemas.comment_moderation
    } else {
        &state.schemas.comment_update
    };
    let input = schema.validate(&input)?;

    let comment = CommentService::new(&state.db, &state.collaborators)
        .update(&id, &user, input)
        .await?;

    Envelope::record(StatusCode::OK, "comment", &comment)
}

/// Casts or replaces the requesting user's vote.
///
/// # Access Control
/// - `Write`
pub async fn vote_comment(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Write])
        .await?;

    let input = state.schemas.vote.validate(&input)?;
    let comment = CommentService::new(&state.db, &state.collaborators)
        .vote(&id, &user, input)
        .await?;

    Envelope::record(StatusCode::OK, "comment", &comment)
}

/// Deletes a comment together with its replies.
///
/// # Access Control
/// - The author, or `Admin`
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Read])
        .await?;

    let comment = CommentService::new(&state.db, &state.collaborators)
        .delete(&id, &user)
        .await?;

    Envelope::record(StatusCode::OK, "comment", &comment)
}
