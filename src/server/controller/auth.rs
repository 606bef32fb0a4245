use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{auth::AuthGuard, session::AuthSession},
    service::auth::AuthService,
    state::AppState,
    util::{envelope::Envelope, form::FormInput},
};

/// Registers a new account.
///
/// # Returns
/// - `201 Created` - `{user}`
/// - `400 Bad Request` - Validation failed
/// - `409 Conflict` - Username or email taken
pub async fn signup(
    State(state): State<AppState>,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let input = state.schemas.signup.validate(&input)?;

    let user = AuthService::new(&state.db, &state.collaborators)
        .signup(input, state.owner_email.as_deref())
        .await?;

    Envelope::record(StatusCode::CREATED, "user", &user)
}

/// Logs in with email and password.
///
/// The user id is stored in the session and a bearer token is returned for clients
/// that do not keep cookies.
///
/// # Returns
/// - `200 OK` - `{user, token}`
/// - `401 Unauthorized` - Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    input: FormInput,
) -> Result<impl IntoResponse, AppError> {
    let input = state.schemas.login.validate(&input)?;

    let (user, token) = AuthService::new(&state.db, &state.collaborators)
        .login(input)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok(Envelope::record(StatusCode::OK, "user", &user)?.with_scalar("token", token))
}

/// Logs out, revoking the presented bearer token and clearing the session.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session, &headers);

    if let Some(user) = guard.current_user().await? {
        AuthService::new(&state.db, &state.collaborators)
            .logout(&user, guard.bearer_token())
            .await?;
    }

    AuthSession::new(&session).clear().await;

    Ok(Envelope::new(StatusCode::OK))
}

/// Returns the requesting user.
///
/// # Returns
/// - `200 OK` - `{user}`
/// - `401 Unauthorized` - Not logged in
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let Some(user) = AuthGuard::new(&state.db, &session, &headers)
        .current_user()
        .await?
    else {
        return Err(AuthError::UserNotInSession.into());
    };

    Envelope::record(StatusCode::OK, "user", &user)
}
