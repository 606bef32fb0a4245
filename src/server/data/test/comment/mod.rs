use crate::server::{data::comment::CommentRepository, model::comment::CreateCommentParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests creating a reply links it under its parent.
///
/// Expected: parent lists the reply id
#[tokio::test]
async fn reply_is_listed_on_parent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    let author = factory::create_user(db).await?;
    let parent = factory::create_comment(db, article.id).await?;

    let repo = CommentRepository::new(db);
    let reply = repo
        .create(CreateCommentParams {
            article: article.id,
            author: Some(author.id),
            parent: Some(parent.id),
            comment: "Agreed".to_string(),
        })
        .await?;

    let parent = repo.find_by_id(parent.id).await?.unwrap();
    assert_eq!(parent.reply, vec![reply.id]);
    assert_eq!(reply.parent, Some(parent.id));
    assert!(!reply.read);

    Ok(())
}

/// Tests that voting twice replaces the earlier vote.
///
/// Expected: a single vote holding the latest value
#[tokio::test]
async fn revote_replaces_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    let voter = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let comment = factory::create_comment(db, article.id).await?;

    let repo = CommentRepository::new(db);
    repo.set_vote(comment.id, voter.id, 2).await?;
    repo.set_vote(comment.id, voter.id, -1).await?;
    repo.set_vote(comment.id, other.id, 3).await?;

    let comment = repo.find_by_id(comment.id).await?.unwrap();
    assert_eq!(comment.votes.len(), 2);
    assert_eq!(comment.score(), 2);

    Ok(())
}

/// Tests that deleting a comment removes its reply subtree.
///
/// Expected: parent, child and grandchild gone; sibling kept
#[tokio::test]
async fn delete_cascades_to_replies() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    let root = factory::create_comment(db, article.id).await?;
    let child = factory::comment::CommentFactory::new(db, article.id)
        .parent(root.id)
        .build()
        .await?;
    let grandchild = factory::comment::CommentFactory::new(db, article.id)
        .parent(child.id)
        .build()
        .await?;
    let sibling = factory::create_comment(db, article.id).await?;

    let repo = CommentRepository::new(db);
    repo.delete(root.id).await?.unwrap();

    assert!(repo.find_by_id(child.id).await?.is_none());
    assert!(repo.find_by_id(grandchild.id).await?.is_none());
    assert!(repo.find_by_id(sibling.id).await?.is_some());

    Ok(())
}

/// Tests that deleting the author keeps the comment with no author.
///
/// Expected: comment kept, author None
#[tokio::test]
async fn deleting_author_keeps_comment() -> Result<(), DbErr> {
    use crate::server::data::user::UserRepository;

    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let article = factory::create_article(db).await?;
    let author = factory::create_user(db).await?;
    let comment = factory::comment::CommentFactory::new(db, article.id)
        .author(author.id)
        .build()
        .await?;

    UserRepository::new(db).delete(author.id).await?;

    let comment = CommentRepository::new(db)
        .find_by_id(comment.id)
        .await?
        .unwrap();
    assert_eq!(comment.author, None);

    Ok(())
}
