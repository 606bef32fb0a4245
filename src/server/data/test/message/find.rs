use super::*;

/// Tests that messages are listed newest first.
///
/// Expected: most recent message first
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = factory::message::MessageFactory::new(db)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    let newer = factory::message::MessageFactory::new(db)
        .created_at(now)
        .build()
        .await?;

    let repo = MessageRepository::new(db);
    let (messages, total) = repo.find(MessageFilter::default(), Page::default()).await?;

    assert_eq!(total, 2);
    assert_eq!(messages[0].id, newer.id);
    assert_eq!(messages[1].id, older.id);

    Ok(())
}

/// Tests that unread messages come before read ones sent at the same time.
///
/// Expected: unread message first
#[tokio::test]
async fn unread_before_read_on_ties() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let at = Utc::now();
    factory::message::MessageFactory::new(db)
        .created_at(at)
        .read(true)
        .build()
        .await?;
    let unread = factory::message::MessageFactory::new(db)
        .created_at(at)
        .build()
        .await?;

    let repo = MessageRepository::new(db);
    let (messages, _) = repo.find(MessageFilter::default(), Page::default()).await?;

    assert_eq!(messages[0].id, unread.id);
    assert!(messages[1].read);

    Ok(())
}

/// Tests filtering by the read flag.
///
/// Expected: only unread messages
#[tokio::test]
async fn filters_by_read() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::message::MessageFactory::new(db).read(true).build().await?;
    let unread = factory::create_message(db).await?;

    let repo = MessageRepository::new(db);
    let (messages, total) = repo
        .find(MessageFilter { read: Some(false) }, Page::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(messages[0].id, unread.id);

    Ok(())
}
