use super::*;

/// Tests listing users filtered by role.
///
/// Expected: only admins returned, total counts matches only
#[tokio::test]
async fn filters_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .find(
            UserFilter {
                role: Some(Role::Admin),
            },
            Page::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, admin.id);

    Ok(())
}

/// Tests that `skip` selects a page rather than a row offset.
///
/// Expected: second page of size 2 holds the third user
#[tokio::test]
async fn skip_is_a_page_index() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Ann", "Bob", "Cid"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo.find(UserFilter::default(), Page::new(1, 2)).await?;

    assert_eq!(total, 3);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Cid");

    Ok(())
}

/// Tests that listed users carry their tokens.
///
/// Expected: tokens attached to the owning user only
#[tokio::test]
async fn attaches_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ann = factory::user::UserFactory::new(db).name("Ann").build().await?;
    factory::user::UserFactory::new(db).name("Bob").build().await?;
    factory::user::create_user_token(db, ann.id, "t1").await?;

    let repo = UserRepository::new(db);
    let (users, _) = repo.find(UserFilter::default(), Page::default()).await?;

    assert_eq!(users[0].tokens, vec!["t1".to_string()]);
    assert!(users[1].tokens.is_empty());

    Ok(())
}
