use super::*;

/// Tests creating a user stores an unverified guest without tokens.
///
/// Expected: Ok with role guest, verified false and no tokens
#[tokio::test]
async fn creates_unverified_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("alice")).await?;

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::Guest);
    assert!(!user.verified);
    assert!(user.tokens.is_empty());
    assert_eq!(user.created_at, user.updated_at);

    Ok(())
}

/// Tests that a duplicate email is rejected by the database.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("alice")).await?;

    let mut duplicate = params("alice2");
    duplicate.email = "alice@example.com".to_string();
    let result = repo.create(duplicate).await;

    assert!(matches!(
        result.unwrap_err().sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
