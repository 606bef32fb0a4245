use axum::{
    routing::{get, post},
    Router,
};

use crate::server::{
    controller::{article, auth, category, comment, message, project, user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/users", get(user::get_users))
        .route(
            "/api/users/{id}",
            get(user::get_user)
                .put(user::update_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route("/api/users/{id}/verify", post(user::verify_user))
        .route(
            "/api/messages",
            get(message::get_messages).post(message::create_message),
        )
        .route(
            "/api/messages/{id}",
            get(message::get_message)
                .put(message::update_message)
                .patch(message::update_message)
                .delete(message::delete_message),
        )
        .route(
            "/api/categories",
            get(category::get_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .patch(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/api/articles",
            get(article::get_articles).post(article::create_article),
        )
        .route("/api/articles/slug/{slug}", get(article::get_article_by_slug))
        .route(
            "/api/articles/{id}",
            get(article::get_article)
                .put(article::update_article)
                .patch(article::update_article)
                .delete(article::delete_article),
        )
        .route(
            "/api/articles/{id}/comments",
            get(article::get_article_comments).post(article::create_article_comment),
        )
        .route(
            "/api/comments/{id}",
            get(comment::get_comment)
                .put(comment::update_comment)
                .patch(comment::update_comment)
                .delete(comment::delete_comment),
        )
        .route("/api/comments/{id}/vote", post(comment::vote_comment))
        .route(
            "/api/projects",
            get(project::get_projects).post(project::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(project::get_project)
                .put(project::update_project)
                .patch(project::update_project)
                .delete(project::delete_project),
        )
}
