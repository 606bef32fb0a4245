use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    model::{article::ArticleFilter, page::Page},
    service::article::ArticleService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

/// Lists articles, optionally only featured ones or those in a category.
pub async fn get_articles(
    State(state): State<AppState>,
    Query(filter): Query<ArticleFilter>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    let (articles, total) = ArticleService::new(&state.db, &state.collaborators)
        .list(filter, page)
        .await?;

    Ok(Envelope::records(StatusCode::OK, "articles", &articles)?.with_scalar("total", total))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::new(&state.db, &state.collaborators)
        .get(&id)
        .await?;

    Envelope::record(StatusCode::OK, "article", &article)
}

pub async fn get_article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleService::new(&state.db, &state.collaborators)
        .get_by_slug(&slug)
        .await?;

    Envelope::record(StatusCode::OK, "article", &article)
}

/// Creates an article from JSON or multipart input with an optional `image`.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - `{article}`
/// - `400 Bad Request` - Validation failed or a category does not exist
/// - `503 Service Unavailable` - Upload failed; nothing was stored
pub async fn create_article(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let author = AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.article.validate(&input)?;
    let article = ArticleService::new(&state.db, &state.collaborators)
        .create(&author, input)
        .await?;

    Envelope::record(StatusCode::CREATED, "article", &article)
}

/// Updates an article; categories change through `{action, value}` entries.
///
/// # Access Control
/// - `Admin`
pub async fn update_article(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let input = state.schemas.article_update.validate(&input)?;
    let article = ArticleService::new(&state.db, &state.collaborators)
        .update(&id, input)
        .await?;

    Envelope::record(StatusCode::OK, "article", &article)
}

/// # Access Control
/// - `Admin`
pub async fn delete_article(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Admin])
        .await?;

    let article = ArticleService::new(&state.db, &state.collaborators)
        .delete(&id)
        .await?;

    Envelope::record(StatusCode::OK, "article", &article)
}

/// Every comment on an article, oldest first.
pub async fn get_article_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comments = ArticleService::new(&state.db, &state.collaborators)
        .comments(&id)
        .await?;

    Envelope::records(StatusCode::OK, "comments", &comments)
}

/// Comments on an article, optionally replying to another comment.
///
/// # Access Control
/// - `Write`
pub async fn create_article_comment(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, &headers)
        .require(&[Permission::Write])
        .await?;

    let input = state.schemas.comment.validate(&input)?;
    let comment = ArticleService::new(&state.db, &state.collaborators)
        .add_comment(&id, &user, input)
        .await?;

    Envelope::record(StatusCode::CREATED, "comment", &comment)
}
