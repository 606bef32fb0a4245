use axum::http::{header, HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod require;

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
        headers.insert(header::AUTHORIZATION, value);
    }
    headers
}

/// Tests that an anonymous request resolves to no user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn anonymous_request_has_no_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    assert!(guard.current_user().await?.is_none());

    Ok(())
}

/// Tests that a session user id resolves to that user.
///
/// Expected: Ok(Some(user))
#[tokio::test]
async fn resolves_user_from_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);
    let current = guard.current_user().await?.unwrap();

    assert_eq!(current.id, user.id);

    Ok(())
}

/// Tests that a bearer token resolves to its owner.
///
/// Expected: Ok(Some(user)) with the token in the user's token set
#[tokio::test]
async fn resolves_user_from_bearer_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    factory::user::create_user_token(db, user.id, "token-abc").await?;

    let headers = bearer("token-abc");
    let guard = AuthGuard::new(db, session, &headers);
    let current = guard.current_user().await?.unwrap();

    assert_eq!(current.id, user.id);
    assert_eq!(current.tokens, vec!["token-abc".to_string()]);

    Ok(())
}

/// Tests that an unknown bearer token is rejected even when the session is valid.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_unknown_bearer_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = bearer("unknown");
    let guard = AuthGuard::new(db, session, &headers);
    let result = guard.current_user().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests that a session pointing at a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_session_for_missing_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);
    let result = guard.current_user().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}
