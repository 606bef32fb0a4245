//! Comment edits, moderation and votes.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::comment::CommentRepository,
    error::{auth::AuthError, AppError},
    model::{comment::Comment, user::User},
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
};

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    pub async fn get(&self, id: &str) -> Result<Comment, AppError> {
        RecordLoader::new(&CommentRepository::new(self.db))
            .load(id)
            .await
    }

    /// Applies a validated edit by `user`, who must be the author or an admin.
    ///
    /// Controllers validate admins against `comment_moderation`, which also accepts
    /// `read`, and everyone else against `comment_update`.
    ///
    /// # Returns
    /// - `Ok(Comment)` - The comment as stored after the update
    /// - `Err(AuthError::AccessDenied)` - `user` neither wrote the comment nor moderates
    pub async fn update(
        &self,
        id: &str,
        user: &User,
        input: Normalized,
    ) -> Result<Comment, AppError> {
        let repo = CommentRepository::new(self.db);
        let comment = RecordLoader::new(&repo).load(id).await?;
        ensure_author_or_admin(&comment, user)?;

        UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .apply(&comment, input.into_patch())
            .await
    }

    /// Records `user`'s vote from validated `vote` input, replacing an earlier vote.
    pub async fn vote(&self, id: &str, user: &User, mut input: Normalized) -> Result<Comment, AppError> {
        let repo = CommentRepository::new(self.db);
        let comment = RecordLoader::new(&repo).load(id).await?;

        let vote = input.take_i32("vote").unwrap_or_default();
        repo.set_vote(comment.id, user.id, vote).await?;

        tracing::debug!("User {} voted {} on comment {}", user.id, vote, comment.id);

        repo.find_by_id(comment.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Deletes a comment and its replies; `user` must be the author or an admin.
    pub async fn delete(&self, id: &str, user: &User) -> Result<Comment, AppError> {
        let repo = CommentRepository::new(self.db);
        let comment = RecordLoader::new(&repo).load(id).await?;
        ensure_author_or_admin(&comment, user)?;

        repo.delete(comment.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }
}

fn ensure_author_or_admin(comment: &Comment, user: &User) -> Result<(), AppError> {
    if user.is_admin() || comment.author == Some(user.id) {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        user.id,
        format!("User is not the author of comment {}", comment.id),
    )
    .into())
}
