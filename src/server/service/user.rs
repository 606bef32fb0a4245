//! User management.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::user::UserRepository,
    error::AppError,
    model::{
        page::Page,
        user::{Role, User, UserFilter},
    },
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
    util::password::hash_password,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    pub async fn list(&self, filter: UserFilter, page: Page) -> Result<(Vec<User>, u64), AppError> {
        Ok(UserRepository::new(self.db).find(filter, page).await?)
    }

    pub async fn get(&self, id: &str) -> Result<User, AppError> {
        RecordLoader::new(&UserRepository::new(self.db)).load(id).await
    }

    /// Applies validated `profile` input to a user.
    ///
    /// A new password is hashed before it reaches the mutator and an uploaded
    /// `profile_pic` is stored before anything is committed.
    ///
    /// # Returns
    /// - `Ok(User)` - The user as stored after the update
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::Conflict)` - New username or email already taken
    /// - `Err(AppError::StorageErr)` - Upload failed; the user is unchanged
    pub async fn update(&self, id: &str, mut input: Normalized) -> Result<User, AppError> {
        let password = input.take_string("password");
        let mut patch = input.into_patch();

        if let Some(password) = password {
            patch = patch.set("password", hash_password(&password)?);
        }

        let repo = UserRepository::new(self.db);
        UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .run(id, patch)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let user = RecordLoader::new(&repo).load(id).await?;

        repo.delete(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Marks a user as verified.
    pub async fn verify(&self, id: &str) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let user = RecordLoader::new(&repo).load(id).await?;

        repo.set_verified(user.id, true)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Gives the admin role to the user registered with `email`, if there is one.
    pub async fn promote_owner(&self, email: &str) -> Result<bool, AppError> {
        let promoted = UserRepository::new(self.db)
            .set_role_by_email(email, Role::Admin)
            .await?;

        if promoted {
            tracing::info!("Granted admin role to owner account {}", email);
        }

        Ok(promoted)
    }
}
