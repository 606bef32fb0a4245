use super::*;
use crate::server::pipeline::{mutator::FieldMutator, patch::Patch};

/// Tests that saving writes changed columns and applies token edits.
///
/// Expected: Ok with new name, added token stored, removed token gone, created_at kept
#[tokio::test]
async fn writes_fields_and_token_edits() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_user(db).await?;
    factory::user::create_user_token(db, model.id, "old").await?;

    let repo = UserRepository::new(db);
    let user = repo.find_by_id(model.id).await?.unwrap();
    let patch = Patch::new().set("name", "Renamed").add("tokens", "new");
    let mutation = FieldMutator::apply(&user, patch).unwrap();

    let saved = repo.save(&mutation).await?;
    assert_eq!(saved.tokens, vec!["old".to_string(), "new".to_string()]);

    let mutation = FieldMutator::apply(&saved, Patch::new().remove("tokens", "old")).unwrap();
    let saved = repo.save(&mutation).await?;

    assert_eq!(saved.name, "Renamed");
    assert_eq!(saved.tokens, vec!["new".to_string()]);
    assert_eq!(saved.created_at, user.created_at);
    assert!(saved.updated_at >= user.updated_at);

    let stored = repo.find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.tokens, vec!["new".to_string()]);
    assert!(repo.find_by_token("old").await?.is_none());

    Ok(())
}

/// Tests that two saves made from the same loaded snapshot both keep their token.
///
/// Expected: both tokens stored after the second save
#[tokio::test]
async fn token_added_from_stale_snapshot_keeps_earlier_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let first = repo.find_by_id(model.id).await?.unwrap();
    let second = first.clone();

    let mutation = FieldMutator::apply(&first, Patch::new().add("tokens", "tok-a")).unwrap();
    repo.save(&mutation).await?;

    let mutation = FieldMutator::apply(&second, Patch::new().add("tokens", "tok-b")).unwrap();
    let saved = repo.save(&mutation).await?;

    assert_eq!(saved.tokens, vec!["tok-a".to_string(), "tok-b".to_string()]);
    assert!(repo.find_by_token("tok-a").await?.is_some());

    Ok(())
}

/// Tests that a stale snapshot does not write back columns it did not change.
///
/// Expected: the name saved first survives a later save that only changes `about`
#[tokio::test]
async fn stale_snapshot_keeps_unchanged_columns() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let first = repo.find_by_id(model.id).await?.unwrap();
    let second = first.clone();

    let mutation = FieldMutator::apply(&first, Patch::new().set("name", "Renamed")).unwrap();
    repo.save(&mutation).await?;

    let mutation = FieldMutator::apply(&second, Patch::new().set("about", "Hello")).unwrap();
    let saved = repo.save(&mutation).await?;

    assert_eq!(saved.name, "Renamed");
    assert_eq!(saved.about.as_deref(), Some("Hello"));

    Ok(())
}

/// Tests that a save colliding with another user's username commits nothing.
///
/// Expected: Err, and the stored user keeps its tokens and username
#[tokio::test]
async fn failed_save_commits_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let taken = factory::create_user(db).await?;
    let model = factory::create_user(db).await?;
    factory::user::create_user_token(db, model.id, "keep").await?;

    let repo = UserRepository::new(db);
    let user = repo.find_by_id(model.id).await?.unwrap();
    let patch = Patch::new()
        .set("username", taken.username.clone())
        .remove("tokens", "keep");
    let mutation = FieldMutator::apply(&user, patch).unwrap();

    assert!(repo.save(&mutation).await.is_err());

    let stored = repo.find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.username, model.username);
    assert_eq!(stored.tokens, vec!["keep".to_string()]);

    Ok(())
}
