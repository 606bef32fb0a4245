//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let admin = UserFactory::new(&db)
///     .email("owner@example.com")
///     .admin()
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    username: String,
    email: String,
    password: String,
    role: String,
    verified: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - name: `"User {id}"`
    /// - username: `"user{id}"`
    /// - email: `"user{id}@example.com"`
    /// - password: an opaque placeholder, not a valid argon2 hash
    /// - role: `"guest"`, verified: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("User {}", id),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password: "not-a-hash".to_string(),
            role: "guest".to_string(),
            verified: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password column verbatim, so pass an already hashed value.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = hash.into();
        self
    }

    /// Gives the user the `admin` role.
    pub fn admin(mut self) -> Self {
        self.role = "admin".to_string();
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            name: ActiveValue::Set(self.name),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password: ActiveValue::Set(self.password),
            role: ActiveValue::Set(self.role),
            verified: ActiveValue::Set(self.verified),
            keywords: ActiveValue::Set(None),
            summary: ActiveValue::Set(None),
            info: ActiveValue::Set(None),
            about: ActiveValue::Set(None),
            profile_pic_path: ActiveValue::Set(None),
            profile_pic_width: ActiveValue::Set(None),
            profile_pic_height: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verified guest user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a verified admin user with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).admin().build().await
}

/// Stores a session token for the given user.
pub async fn create_user_token(
    db: &DatabaseConnection,
    user_id: i32,
    token: impl Into<String>,
) -> Result<entity::user_token::Model, DbErr> {
    entity::user_token::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        token: ActiveValue::Set(token.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}
