use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{capabilities, AuthGuard, Permission},
    model::{page::Page, project::ProjectFilter},
    service::project::ProjectService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

/// Lists projects. Only admins see unpublished ones.
pub async fn get_projects(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(mut filter): Query<ProjectFilter>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, &headers)
        .current_user()
        .await?;

    let is_admin = user
        .as_ref()
        .is_some_and(|user| capabilities(user).contains(&Permission::Admin));
    if !is_admin {
        filter.published = Some(true);
    }

    let (projects, total) = ProjectService::new(&state.db, &state.collaborators)
        .list(filter, page)
        .await?;

    Ok(Envelope::records(StatusCode::OK, "projects", &projects)?.with_scalar("total", total))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = ProjectService::new(&state.db, &state.collaborators)
        .get(&id)
        .await?;

    Envelope::record(StatusCode::OK, "project", &project)
}

/// Creates a project; `categories` are titles, created when missing.
///
/// # Access Control
/// - `Admin`
pub async fn create_project(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.project.validate(&input)?;
    let project = ProjectService::new(&state.db, &state.collaborators)
        .create(input)
        .await?;

    Envelope::record(StatusCode::CREATED, "project", &project)
}

/// # Access Control
/// - `Admin`
pub async fn update_project(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.project_update.validate(&input)?;
    let project = ProjectService::new(&state.db, &state.collaborators)
        .update(&id, input)
        .await?;

    Envelope::record(StatusCode::OK, "project", &project)
}

/// # Access Control
/// - `Admin`
pub async fn delete_project(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let project = ProjectService::new(&state.db, &state.collaborators)
        .delete(&id)
        .await?;

    Envelope::record(StatusCode::OK, "project", &project)
}
