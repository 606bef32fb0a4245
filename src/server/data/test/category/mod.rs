use crate::server::{
    data::category::{resolve_titles, CategoryRepository},
    model::{category::CreateCategoryParams, page::Page},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests creating and reading back a category.
///
/// Expected: Ok with the given title and description
#[tokio::test]
async fn creates_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let created = repo
        .create(CreateCategoryParams {
            title: "Rust".to_string(),
            description: Some("Systems programming".to_string()),
        })
        .await?;

    let found = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(found.title, "Rust");
    assert_eq!(found.description.as_deref(), Some("Systems programming"));

    Ok(())
}

/// Tests that titles are unique.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_title() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let params = CreateCategoryParams {
        title: "Rust".to_string(),
        description: None,
    };
    repo.create(params.clone()).await?;

    assert!(repo.create(params).await.is_err());

    Ok(())
}

/// Tests that resolving titles reuses an existing category and creates a missing one.
///
/// Expected: existing id first, one new category, blanks and repeats skipped
#[tokio::test]
async fn resolve_titles_reuses_existing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::category::CategoryFactory::new(db)
        .title("Web")
        .build()
        .await?;

    let titles = ["Web", " CLI ", "", "Web"].map(String::from);
    let ids = resolve_titles(db, &titles).await?;

    let repo = CategoryRepository::new(db);
    let cli = repo.find_by_title("CLI").await?.unwrap();
    assert_eq!(ids, vec![existing.id, cli.id]);
    let (_, total) = repo.find(Page::default()).await?;
    assert_eq!(total, 2);

    Ok(())
}

/// Tests that categories created inside a rolled back transaction are discarded.
///
/// Expected: no category stored after rollback
#[tokio::test]
async fn resolve_titles_rolls_back_with_transaction() -> Result<(), DbErr> {
    use sea_orm::TransactionTrait;

    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let txn = db.begin().await?;
    resolve_titles(&txn, &["Orphan".to_string()]).await?;
    txn.rollback().await?;

    let repo = CategoryRepository::new(db);
    assert!(repo.find_by_title("Orphan").await?.is_none());

    Ok(())
}

/// Tests that deleting a category unlinks it from articles without deleting them.
///
/// Expected: article kept with no categories
#[tokio::test]
async fn delete_unlinks_articles() -> Result<(), DbErr> {
    use crate::server::data::article::ArticleRepository;

    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let article = factory::article::ArticleFactory::new(db)
        .category(category.id)
        .build()
        .await?;

    let repo = CategoryRepository::new(db);
    repo.delete(category.id).await?.unwrap();

    let article = ArticleRepository::new(db)
        .find_by_id(article.id)
        .await?
        .unwrap();
    assert!(article.categories.is_empty());

    Ok(())
}
