use super::*;
use crate::server::pipeline::{
    mutator::FieldMutator,
    patch::{Patch, PatchValue},
};
use serde_json::json;

/// Tests that saving writes the read flag and appends a pushed reply.
///
/// Expected: Ok with read true and the new reply after the stored one
#[tokio::test]
async fn writes_read_flag_and_appends_reply() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_message(db).await?;
    factory::message::create_message_reply(db, model.id, 0, "first").await?;

    let repo = MessageRepository::new(db);
    let message = repo.find_by_id(model.id).await?.unwrap();
    let mut patch = Patch::new().set("read", true);
    patch.insert("reply", PatchValue::Push(json!("second")));
    let mutation = FieldMutator::apply(&message, patch).unwrap();

    let saved = repo.save(&mutation).await?;
    assert!(saved.read);
    assert_eq!(saved.reply, vec!["first".to_string(), "second".to_string()]);

    let stored = repo.find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.reply, saved.reply);
    assert_eq!(stored.subject, model.subject);

    Ok(())
}

/// Tests that replies pushed from the same loaded snapshot are both kept.
///
/// Expected: both replies stored in commit order
#[tokio::test]
async fn replies_from_stale_snapshot_are_both_kept() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_message(db).await?;

    let repo = MessageRepository::new(db);
    let snapshot = repo.find_by_id(model.id).await?.unwrap();

    for body in ["one", "two"] {
        let mut patch = Patch::new();
        patch.insert("reply", PatchValue::Push(json!(body)));
        let mutation = FieldMutator::apply(&snapshot, patch).unwrap();
        repo.save(&mutation).await?;
    }

    let stored = repo.find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.reply, vec!["one".to_string(), "two".to_string()]);

    Ok(())
}

/// Tests deleting a message removes its replies.
///
/// Expected: Ok(Some(message)) then no message and no reply rows
#[tokio::test]
async fn delete_removes_thread() -> Result<(), DbErr> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_message(db).await?;
    factory::message::create_message_reply(db, model.id, 0, "reply").await?;

    let repo = MessageRepository::new(db);
    let deleted = repo.delete(model.id).await?.unwrap();

    assert_eq!(deleted.reply.len(), 1);
    assert!(repo.find_by_id(model.id).await?.is_none());
    assert_eq!(entity::prelude::MessageReply::find().count(db).await?, 0);

    Ok(())
}
