//! Comment factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct CommentFactory<'a> {
    db: &'a DatabaseConnection,
    article_id: i32,
    author_id: Option<i32>,
    parent_id: Option<i32>,
    comment: String,
    read: bool,
}

impl<'a> CommentFactory<'a> {
    /// Defaults to an unread, anonymous top-level comment on the given article.
    pub fn new(db: &'a DatabaseConnection, article_id: i32) -> Self {
        Self {
            db,
            article_id,
            author_id: None,
            parent_id: None,
            comment: "Nice article".to_string(),
            read: false,
        }
    }

    pub fn author(mut self, user_id: i32) -> Self {
        self.author_id = Some(user_id);
        self
    }

    pub fn parent(mut self, comment_id: i32) -> Self {
        self.parent_id = Some(comment_id);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub async fn build(self) -> Result<entity::comment::Model, DbErr> {
        let now = Utc::now();
        entity::comment::ActiveModel {
            article_id: ActiveValue::Set(self.article_id),
            author_id: ActiveValue::Set(self.author_id),
            parent_id: ActiveValue::Set(self.parent_id),
            comment: ActiveValue::Set(self.comment),
            read: ActiveValue::Set(self.read),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_comment(
    db: &DatabaseConnection,
    article_id: i32,
) -> Result<entity::comment::Model, DbErr> {
    CommentFactory::new(db, article_id).build().await
}

/// Records a vote by `user_id` on a comment.
pub async fn create_vote(
    db: &DatabaseConnection,
    comment_id: i32,
    user_id: i32,
    vote: i32,
) -> Result<entity::comment_vote::Model, DbErr> {
    entity::comment_vote::ActiveModel {
        comment_id: ActiveValue::Set(comment_id),
        user_id: ActiveValue::Set(user_id),
        vote: ActiveValue::Set(vote),
    }
    .insert(db)
    .await
}
