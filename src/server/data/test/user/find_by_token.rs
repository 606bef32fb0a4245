use super::*;

/// Tests finding a user by one of their tokens.
///
/// Expected: Ok(Some(user))
#[tokio::test]
async fn finds_token_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::user::create_user_token(db, user.id, "first").await?;
    factory::user::create_user_token(db, user.id, "second").await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_token("second").await?.unwrap();

    assert_eq!(found.id, user.id);
    assert_eq!(found.tokens, vec!["first".to_string(), "second".to_string()]);

    Ok(())
}

/// Tests that an unknown token finds nobody.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert!(repo.find_by_token("missing").await?.is_none());

    Ok(())
}
