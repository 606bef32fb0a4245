use super::*;

/// Tests that a new message is unread with an empty thread.
///
/// Expected: Ok with read false and no replies
#[tokio::test]
async fn creates_unread_message() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MessageRepository::new(db);
    let message = repo
        .create(CreateMessageParams {
            name: "Visitor".to_string(),
            subject: "Hello".to_string(),
            email: "visitor@example.com".to_string(),
            message: "Nice site".to_string(),
        })
        .await?;

    assert!(!message.read);
    assert!(message.reply.is_empty());
    assert_eq!(message.subject, "Hello");

    Ok(())
}

/// Tests that replies load in thread order regardless of insertion order.
///
/// Expected: replies ordered by position
#[tokio::test]
async fn loads_thread_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_message(db).await?;
    factory::message::create_message_reply(db, model.id, 1, "second").await?;
    factory::message::create_message_reply(db, model.id, 0, "first").await?;

    let repo = MessageRepository::new(db);
    let message = repo.find_by_id(model.id).await?.unwrap();

    assert_eq!(message.reply, vec!["first".to_string(), "second".to_string()]);

    Ok(())
}
