//! Comment repository.
//!
//! A comment aggregate is the `comment` row plus its `comment_vote` rows. Reply ids are
//! derived from child comments pointing at it through `parent_id`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{group_by, set_if},
    model::comment::{Comment, CreateCommentParams},
    pipeline::{mutator::Mutation, record::Repository},
};

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an unread comment without votes.
    ///
    /// # Returns
    /// - `Ok(Comment)` - The stored comment
    /// - `Err(DbErr)` - Insert failed; an unknown article, author or parent is a foreign
    ///   key violation
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, DbErr> {
        let now = Utc::now();
        let entity = entity::comment::ActiveModel {
            article_id: ActiveValue::Set(params.article),
            author_id: ActiveValue::Set(params.author),
            parent_id: ActiveValue::Set(params.parent),
            comment: ActiveValue::Set(params.comment),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Comment::from_entity(entity, Vec::new(), Vec::new()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        let entity = entity::prelude::Comment::find_by_id(id).one(self.db).await?;

        Ok(hydrate_all(self.db, entity.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    /// Gets every comment on an article, oldest first.
    pub async fn find_by_article(&self, article_id: i32) -> Result<Vec<Comment>, DbErr> {
        let entities = entity::prelude::Comment::find()
            .filter(entity::comment::Column::ArticleId.eq(article_id))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .all(self.db)
            .await?;

        hydrate_all(self.db, entities).await
    }

    /// Writes the comment text and read flag when they changed.
    ///
    /// Votes are only changed through `set_vote`; replies through `create`.
    pub async fn save(&self, mutation: &Mutation<Comment>) -> Result<Comment, DbErr> {
        let comment = &mutation.record;
        entity::comment::ActiveModel {
            id: ActiveValue::Unchanged(comment.id),
            comment: set_if(mutation, "comment", comment.comment.clone()),
            read: set_if(mutation, "read", comment.read),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        self.find_by_id(comment.id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Comment {} not found", comment.id)))
    }

    /// Records `user_id`'s vote on a comment, replacing an earlier vote by the same user.
    pub async fn set_vote(&self, comment_id: i32, user_id: i32, vote: i32) -> Result<(), DbErr> {
        entity::prelude::CommentVote::insert(entity::comment_vote::ActiveModel {
            comment_id: ActiveValue::Set(comment_id),
            user_id: ActiveValue::Set(user_id),
            vote: ActiveValue::Set(vote),
        })
        .on_conflict(
            OnConflict::columns([
                entity::comment_vote::Column::CommentId,
                entity::comment_vote::Column::UserId,
            ])
            .update_column(entity::comment_vote::Column::Vote)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a comment; its votes and the whole reply subtree cascade.
    pub async fn delete(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        let Some(comment) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::Comment::delete_by_id(id).exec(self.db).await?;

        Ok(Some(comment))
    }
}

#[async_trait]
impl Repository for CommentRepository<'_> {
    type Record = Comment;

    async fn find_one(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<Comment>) -> Result<Comment, DbErr> {
        CommentRepository::save(self, mutation).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        self.delete(id).await
    }
}

async fn hydrate_all<C: ConnectionTrait>(
    conn: &C,
    entities: Vec<entity::comment::Model>,
) -> Result<Vec<Comment>, DbErr> {
    if entities.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();

    let votes = entity::prelude::CommentVote::find()
        .filter(entity::comment_vote::Column::CommentId.is_in(ids.clone()))
        .order_by_asc(entity::comment_vote::Column::UserId)
        .all(conn)
        .await?;
    let mut votes = group_by(votes, |v| v.comment_id);

    let children = entity::prelude::Comment::find()
        .filter(entity::comment::Column::ParentId.is_in(ids))
        .order_by_asc(entity::comment::Column::Id)
        .all(conn)
        .await?;
    let mut children = group_by(children, |c| c.parent_id.unwrap_or_default());

    Ok(entities
        .into_iter()
        .map(|e| {
            let votes = votes.remove(&e.id).unwrap_or_default();
            let reply = children
                .remove(&e.id)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.id)
                .collect();
            Comment::from_entity(e, votes, reply)
        })
        .collect())
}
