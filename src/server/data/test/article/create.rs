use super::*;

/// Tests creating an article with an image, author and categories.
///
/// Expected: Ok with every field stored and no comments
#[tokio::test]
async fn creates_article_with_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let first = factory::create_category(db).await?;
    let second = factory::create_category(db).await?;

    let repo = ArticleRepository::new(db);
    let mut params = params("Hello World", "hello-world");
    params.author = Some(author.id);
    params.categories = vec![second.id, first.id];
    params.image = Some(Image {
        path: "https://cdn.test/articles/a.png".to_string(),
        width: 800,
        height: 600,
    });

    let created = repo.create(params).await?;
    let stored = repo.find_by_slug("hello-world").await?.unwrap();

    assert_eq!(stored.id, created.id);
    assert_eq!(stored.author, Some(author.id));
    assert_eq!(stored.categories, vec![first.id, second.id]);
    assert_eq!(stored.image.unwrap().width, 800);
    assert!(stored.comments.is_empty());

    Ok(())
}

/// Tests that an unknown category rolls back the whole insert.
///
/// Expected: Err and no article row
#[tokio::test]
async fn unknown_category_rolls_back() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ArticleRepository::new(db);
    let mut params = params("Orphan", "orphan");
    params.categories = vec![404];

    let result = repo.create(params).await;

    assert!(matches!(
        result.unwrap_err().sql_err(),
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))
    ));
    assert!(!repo.slug_exists("orphan").await?);

    Ok(())
}

/// Tests that slugs are unique.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ArticleRepository::new(db);
    repo.create(params("One", "same")).await?;

    assert!(repo.create(params("Two", "same")).await.is_err());
    assert!(repo.slug_exists("same").await?);

    Ok(())
}
