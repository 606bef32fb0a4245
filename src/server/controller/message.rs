use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{message::MessageFilter, page::Page},
    service::message::MessageService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

/// Public contact form.
pub async fn create_message(
    State(state): State<AppState>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let input = state.schemas.message.validate(&input)?;

    let message = MessageService::new(&state.db, &state.collaborators)
        .create(input)
        .await?;

    Envelope::record(StatusCode::CREATED, "message", &message)
}

/// Lists messages, newest first with unread ones ahead of read ones.
///
/// # Access Control
/// - `Admin`
pub async fn get_messages(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(filter): Query<MessageFilter>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let (messages, total) = MessageService::new(&state.db, &state.collaborators)
        .list(filter, page)
        .await?;

    Ok(Envelope::records(StatusCode::OK, "messages", &messages)?.with_scalar("total", total))
}

/// # Access Control
/// - `Admin`
pub async fn get_message(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let message = MessageService::new(&state.db, &state.collaborators)
        .get(&id)
        .await?;

    Envelope::record(StatusCode::OK, "message", &message)
}

/// Marks a message read and/or replies to its sender.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - `{message}`
/// - `503 Service Unavailable` - The reply could not be mailed; nothing was stored
pub async fn update_message(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.message_update.validate(&input)?;
    let message = MessageService::new(&state.db, &state.collaborators)
        .update(&id, input)
        .await?;

    Envelope::record(StatusCode::OK, "message", &message)
}

/// # Access Control
/// - `Admin`
pub async fn delete_message(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let message = MessageService::new(&state.db, &state.collaborators)
        .delete(&id)
        .await?;

    Envelope::record(StatusCode::OK, "message", &message)
}
