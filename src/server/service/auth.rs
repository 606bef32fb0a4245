//! Signup, login and logout.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, Role, User},
    pipeline::{patch::Patch, schema::Normalized, UpdatePipeline},
    util::{
        password::{hash_password, verify_password},
        token::generate_token,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    /// Registers a new user from validated `signup` input.
    ///
    /// The password is hashed before storage. A user signing up with `owner_email`
    /// becomes an admin; everyone else starts as an unverified guest.
    ///
    /// # Returns
    /// - `Ok(User)` - The new user
    /// - `Err(AppError::Conflict)` - Username or email already taken
    pub async fn signup(
        &self,
        mut input: Normalized,
        owner_email: Option<&str>,
    ) -> Result<User, AppError> {
        let email = input.take_string("email").unwrap_or_default();
        let password = input.take_string("password").unwrap_or_default();

        let role = match owner_email {
            Some(owner) if owner.eq_ignore_ascii_case(&email) => Role::Admin,
            _ => Role::Guest,
        };

        let user = UserRepository::new(self.db)
            .create(CreateUserParams {
                name: input.take_string("name").unwrap_or_default(),
                username: input.take_string("username").unwrap_or_default(),
                email,
                password_hash: hash_password(&password)?,
                role,
            })
            .await?;

        tracing::info!("User {} signed up as {}", user.id, user.role.as_str());

        Ok(user)
    }

    /// Checks credentials from validated `login` input and issues a bearer token.
    ///
    /// The token is added to the user's token set through the update pipeline.
    ///
    /// # Returns
    /// - `Ok((User, token))` - The user as stored with the new token
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, mut input: Normalized) -> Result<(User, String), AppError> {
        let email = input.take_string("email").unwrap_or_default();
        let password = input.take_string("password").unwrap_or_default();

        let repo = UserRepository::new(self.db);
        let Some(user) = repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&password, &user.password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = generate_token();
        let user = UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .apply(&user, Patch::new().add("tokens", token.clone()))
            .await?;

        tracing::debug!("User {} logged in", user.id);

        Ok((user, token))
    }

    /// Removes `token` from the user's token set; without a token nothing changes.
    pub async fn logout(&self, user: &User, token: Option<&str>) -> Result<User, AppError> {
        let Some(token) = token else {
            return Ok(user.clone());
        };

        let repo = UserRepository::new(self.db);
        let user = UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .apply(user, Patch::new().remove("tokens", token))
            .await?;

        tracing::debug!("User {} logged out", user.id);

        Ok(user)
    }
}
