use super::*;

/// Tests deleting a user removes the user and its tokens.
///
/// Expected: Ok(Some(user)), then nothing found by id or token
#[tokio::test]
async fn deletes_user_and_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_user(db).await?;
    factory::user::create_user_token(db, model.id, "gone").await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete(model.id).await?.unwrap();

    assert_eq!(deleted.id, model.id);
    assert!(repo.find_by_id(model.id).await?.is_none());
    assert!(repo.find_by_token("gone").await?.is_none());

    Ok(())
}

/// Tests deleting a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.delete(99).await?.is_none());

    Ok(())
}
