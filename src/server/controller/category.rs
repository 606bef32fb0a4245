use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::page::Page,
    service::category::CategoryService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// Include a page of the category's articles.
    #[serde(default)]
    pub articles: bool,
}

pub async fn get_categories(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    let (categories, total) = CategoryService::new(&state.db, &state.collaborators)
        .list(page)
        .await?;

    Ok(Envelope::records(StatusCode::OK, "categories", &categories)?.with_scalar("total", total))
}

/// Gets a category; with `?articles=true` one page of its articles is included.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CategoryQuery>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    let service = CategoryService::new(&state.db, &state.collaborators);

    if !query.articles {
        let category = service.get(&id).await?;
        return Envelope::record(StatusCode::OK, "category", &category);
    }

    let (category, articles, total) = service.get_with_articles(&id, page).await?;

    Ok(Envelope::record(StatusCode::OK, "category", &category)?
        .with_records("articles", &articles)?
        .with_scalar("total", total))
}

/// # Access Control
/// - `Admin`
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.category.validate(&input)?;
    let category = CategoryService::new(&state.db, &state.collaborators)
        .create(input)
        .await?;

    Envelope::record(StatusCode::CREATED, "category", &category)
}

/// # Access Control
/// - `Admin`
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.category_update.validate(&input)?;
    let category = CategoryService::new(&state.db, &state.collaborators)
        .update(&id, input)
        .await?;

    Envelope::record(StatusCode::OK, "category", &category)
}

/// Deletes a category, unlinking it from articles and projects.
///
/// # Access Control
/// - `Admin`
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let category = CategoryService::new(&state.db, &state.collaborators)
        .delete(&id)
        .await?;

    Envelope::record(StatusCode::OK, "category", &category)
}
