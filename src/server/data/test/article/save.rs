use super::*;
use crate::server::pipeline::{mutator::FieldMutator, patch::Patch};

/// Tests that saving applies category edits and keeps the slug.
///
/// Expected: added category linked, removed one unlinked, slug unchanged
#[tokio::test]
async fn applies_category_edits() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let old = factory::create_category(db).await?;
    let new = factory::create_category(db).await?;
    let model = factory::article::ArticleFactory::new(db)
        .slug("fixed")
        .category(old.id)
        .build()
        .await?;

    let repo = ArticleRepository::new(db);
    let article = repo.find_by_id(model.id).await?.unwrap();
    let patch = Patch::new()
        .set("title", "New title")
        .set("slug", "ignored")
        .add("categories", new.id);
    let saved = repo.save(&FieldMutator::apply(&article, patch).unwrap()).await?;
    assert_eq!(saved.categories, vec![old.id, new.id]);

    let patch = Patch::new().remove("categories", old.id);
    let saved = repo.save(&FieldMutator::apply(&saved, patch).unwrap()).await?;

    assert_eq!(saved.title, "New title");
    assert_eq!(saved.slug, "fixed");
    assert_eq!(saved.categories, vec![new.id]);

    Ok(())
}

/// Tests that categories added from the same loaded snapshot are both linked.
///
/// Expected: both categories linked after the second save
#[tokio::test]
async fn categories_from_stale_snapshot_are_both_linked() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_category(db).await?;
    let second = factory::create_category(db).await?;
    let model = factory::create_article(db).await?;

    let repo = ArticleRepository::new(db);
    let snapshot = repo.find_by_id(model.id).await?.unwrap();

    for id in [first.id, second.id] {
        let mutation = FieldMutator::apply(&snapshot, Patch::new().add("categories", id)).unwrap();
        repo.save(&mutation).await?;
    }

    let stored = repo.find_by_id(model.id).await?.unwrap();
    assert_eq!(stored.categories, vec![first.id, second.id]);

    Ok(())
}

/// Tests that deleting an article removes its comments.
///
/// Expected: Ok(Some(article)) and no comments left
#[tokio::test]
async fn delete_removes_comments() -> Result<(), DbErr> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    factory::create_comment(db, article.id).await?;

    let repo = ArticleRepository::new(db);
    let deleted = repo.delete(article.id).await?.unwrap();

    assert_eq!(deleted.comments.len(), 1);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 0);

    Ok(())
}
