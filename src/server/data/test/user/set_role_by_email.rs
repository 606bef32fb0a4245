use super::*;

/// Tests promoting a user by email.
///
/// Expected: Ok(true) and the stored role is admin
#[tokio::test]
async fn promotes_matching_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db)
        .email("owner@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_role_by_email("owner@example.com", Role::Admin).await?;

    assert!(updated);
    assert!(repo.find_by_id(model.id).await?.unwrap().is_admin());

    Ok(())
}

/// Tests that an unknown email updates nobody.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(!repo.set_role_by_email("nobody@example.com", Role::Admin).await?);

    Ok(())
}

/// Tests setting the verified flag.
///
/// Expected: Ok(Some(user)) with verified true
#[tokio::test]
async fn sets_verified_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db).verified(false).build().await?;

    let repo = UserRepository::new(db);
    let user = repo.set_verified(model.id, true).await?.unwrap();

    assert!(user.verified);

    Ok(())
}
