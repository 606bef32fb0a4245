use super::*;

/// Tests that an anonymous request fails even with no permissions required.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn requires_authentication() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);
    let result = guard.require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests that an unverified guest may read but not write.
///
/// Expected: Ok for Read, Err(AccessDenied) for Write
#[tokio::test]
async fn unverified_guest_only_reads() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db).verified(false).build().await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    assert!(guard.require(&[Permission::Read]).await.is_ok());
    match guard.require(&[Permission::Write]).await {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, _))) => {
            assert_eq!(user_id, user.id)
        }
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests that a verified guest may write but not administer.
///
/// Expected: Ok for Read + Write, Err(AccessDenied) for Admin
#[tokio::test]
async fn verified_guest_writes_but_is_not_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    assert!(guard
        .require(&[Permission::Read, Permission::Write])
        .await
        .is_ok());
    assert!(matches!(
        guard.require(&[Permission::Admin]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    Ok(())
}

/// Tests that an admin holds every capability.
///
/// Expected: Ok(User) for Read + Write + Admin
#[tokio::test]
async fn admin_holds_every_permission() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);
    let user = guard
        .require(&[Permission::Read, Permission::Write, Permission::Admin])
        .await?;

    assert!(user.is_admin());

    Ok(())
}

/// Tests that a user may act on their own record but not on someone else's.
///
/// Expected: Ok for own id, Err(AccessDenied) for another id
#[tokio::test]
async fn self_or_admin_check() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    assert!(guard.require_self_or_admin(&user.id.to_string()).await.is_ok());
    assert!(matches!(
        guard.require_self_or_admin(&other.id.to_string()).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));
    assert!(matches!(
        guard.require_self_or_admin("not-an-id").await,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    Ok(())
}

/// Tests that an admin may act on any user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn admin_passes_self_or_admin_check() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    let other = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    assert!(guard.require_self_or_admin(&other.id.to_string()).await.is_ok());

    Ok(())
}

/// Tests that an anonymous caller is rejected the same way for existing and missing ids.
///
/// Expected: Err(UserNotInSession) for both
#[tokio::test]
async fn anonymous_self_or_admin_hides_existence() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, session, &headers);

    for id in [user.id.to_string(), (user.id + 1000).to_string()] {
        assert!(matches!(
            guard.require_self_or_admin(&id).await,
            Err(AppError::AuthErr(AuthError::UserNotInSession))
        ));
    }

    Ok(())
}
