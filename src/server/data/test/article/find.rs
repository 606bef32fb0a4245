use super::*;

/// Tests filtering articles by featured flag.
///
/// Expected: only the featured article
#[tokio::test]
async fn filters_featured() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_article(db).await?;
    let featured = factory::article::ArticleFactory::new(db)
        .featured(true)
        .build()
        .await?;

    let repo = ArticleRepository::new(db);
    let (articles, total) = repo
        .find(
            ArticleFilter {
                featured: Some(true),
                category: None,
            },
            Page::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(articles[0].id, featured.id);

    Ok(())
}

/// Tests filtering articles by category.
///
/// Expected: only articles linked to the category
#[tokio::test]
async fn filters_by_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let linked = factory::article::ArticleFactory::new(db)
        .category(category.id)
        .build()
        .await?;
    factory::create_article(db).await?;

    let repo = ArticleRepository::new(db);
    let (articles, total) = repo
        .find(
            ArticleFilter {
                featured: None,
                category: Some(category.id),
            },
            Page::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(articles[0].id, linked.id);
    assert_eq!(articles[0].categories, vec![category.id]);

    Ok(())
}

/// Tests that an article lists the ids of its comments.
///
/// Expected: both comment ids, including the reply
#[tokio::test]
async fn lists_comment_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    let root = factory::create_comment(db, article.id).await?;
    let reply = factory::comment::CommentFactory::new(db, article.id)
        .parent(root.id)
        .build()
        .await?;

    let repo = ArticleRepository::new(db);
    let stored = repo.find_by_id(article.id).await?.unwrap();

    assert_eq!(stored.comments, vec![root.id, reply.id]);

    Ok(())
}
