use super::*;
use crate::server::{
    data::user::UserRepository,
    model::{
        page::Page,
        user::{Role, UserFilter},
    },
    service::user::UserService,
    util::password::verify_password,
};

/// Tests that a profile update hashes the new password.
///
/// Expected: stored hash verifies the new password
#[tokio::test]
async fn update_hashes_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, _, _) = fake::recording();

    let model = factory::create_user(db).await?;

    let input = validate(
        |s| &s.profile,
        json!({"password": "new-secret", "confirm_password": "new-secret", "about": "Hi"}),
    )?;
    let user = UserService::new(db, &collaborators)
        .update(&model.id.to_string(), input)
        .await?;

    assert!(verify_password("new-secret", &user.password));
    assert_eq!(user.about.as_deref(), Some("Hi"));

    Ok(())
}

/// Tests that a profile picture is uploaded into the profiles folder.
///
/// Expected: image descriptor stored from the upload result
#[tokio::test]
async fn update_uploads_profile_pic() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, storage, _) = fake::recording();

    let model = factory::create_user(db).await?;

    let input = validate_with_asset(|s| &s.profile, json!({}), "profile_pic", "me.png")?;
    let user = UserService::new(db, &collaborators)
        .update(&model.id.to_string(), input)
        .await?;

    let pic = user.profile_pic.unwrap();
    assert_eq!(pic.path, "https://cdn.test/profiles/me.png");
    assert_eq!((pic.width, pic.height), (640, 480));
    assert_eq!(
        storage.uploads(),
        vec![("me.png".to_string(), "profiles".to_string())]
    );

    Ok(())
}

/// Tests that a failed upload leaves the whole user unchanged.
///
/// Expected: Err(StorageErr); stored name and picture untouched
#[tokio::test]
async fn failed_upload_leaves_user_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let collaborators = fake::failing();

    let model = factory::user::UserFactory::new(db).name("Before").build().await?;

    let input = validate_with_asset(|s| &s.profile, json!({"name": "After"}), "profile_pic", "me.png")?;
    let result = UserService::new(db, &collaborators)
        .update(&model.id.to_string(), input)
        .await;

    assert!(matches!(result, Err(AppError::StorageErr(_))));

    let stored = UserRepository::new(db).find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.name, "Before");
    assert!(stored.profile_pic.is_none());

    Ok(())
}

/// Tests that taking another user's username is a conflict.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn update_rejects_taken_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, _, _) = fake::recording();

    let taken = factory::create_user(db).await?;
    let model = factory::create_user(db).await?;

    let input = validate(|s| &s.profile, json!({"username": taken.username}))?;
    let result = UserService::new(db, &collaborators)
        .update(&model.id.to_string(), input)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that a malformed or unknown id is not found.
///
/// Expected: Err(NotFound) for both
#[tokio::test]
async fn get_reports_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, _, _) = fake::recording();
    let service = UserService::new(db, &collaborators);

    assert!(matches!(service.get("abc").await, Err(AppError::NotFound(_))));
    assert!(matches!(service.get("77").await, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests verifying, listing by role and deleting users.
///
/// Expected: verified flag set, admin filter applied, deleted user gone
#[tokio::test]
async fn verify_list_and_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, _, _) = fake::recording();
    let service = UserService::new(db, &collaborators);

    let guest = factory::user::UserFactory::new(db).verified(false).build().await?;
    factory::user::create_admin(db).await?;

    let verified = service.verify(&guest.id.to_string()).await?;
    assert!(verified.verified);

    let (admins, total) = service
        .list(UserFilter { role: Some(Role::Admin) }, Page::default())
        .await?;
    assert_eq!(total, 1);
    assert!(admins[0].is_admin());

    service.delete(&guest.id.to_string()).await?;
    assert!(matches!(
        service.get(&guest.id.to_string()).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests promoting the owner account by email.
///
/// Expected: Ok(true) and admin role stored
#[tokio::test]
async fn promotes_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (collaborators, _, _) = fake::recording();

    let owner = factory::user::UserFactory::new(db)
        .email("owner@example.com")
        .build()
        .await?;

    let service = UserService::new(db, &collaborators);
    assert!(service.promote_owner("owner@example.com").await?);
    assert!(service.get(&owner.id.to_string()).await?.is_admin());

    Ok(())
}
