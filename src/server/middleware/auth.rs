//! Authorization gate.
//!
//! A request is authenticated by a bearer token from the `Authorization` header or, when
//! no token is presented, by the user id in the cookie session. Roles map to capability
//! sets and handlers state the capabilities they need.

use axum::http::{header, HeaderMap};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::{Role, User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Browse public content.
    Read,
    /// Comment and vote.
    Write,
    /// Manage site content, messages and users.
    Admin,
}

/// Capabilities granted to `user`.
pub fn capabilities(user: &User) -> &'static [Permission] {
    match (user.role, user.verified) {
        (Role::Admin, _) => &[Permission::Read, Permission::Write, Permission::Admin],
        (Role::Guest, true) => &[Permission::Read, Permission::Write],
        (Role::Guest, false) => &[Permission::Read],
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            session,
            headers,
        }
    }

    /// The bearer token presented with the request, if any.
    pub fn bearer_token(&self) -> Option<&'a str> {
        self.headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Resolves the requesting user without checking capabilities.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Request carries a valid token or session
    /// - `Ok(None)` - Request is anonymous
    /// - `Err(AuthError::InvalidToken)` - A token was presented but matches no user
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);

        if let Some(token) = self.bearer_token() {
            let Some(user) = user_repo.find_by_token(token).await? else {
                return Err(AuthError::InvalidToken.into());
            };
            return Ok(Some(user));
        }

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(Some(user))
    }

    /// Requires an authenticated user holding every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(User)` - The requesting user
    /// - `Err(AuthError::UserNotInSession)` - Request is anonymous (401)
    /// - `Err(AuthError::AccessDenied)` - A permission is missing (403)
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user) = self.current_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let granted = capabilities(&user);
        for permission in permissions {
            if !granted.contains(permission) {
                return Err(AuthError::AccessDenied(
                    user.id,
                    format!("User lacks {:?} permission", permission),
                )
                .into());
            }
        }

        Ok(user)
    }

    /// Requires the requesting user to be the user identified by `target_id`, or an admin.
    ///
    /// Runs before the target is loaded, so callers learn nothing about other users'
    /// ids: anonymous requests always get 401 and other non-admins 403, whether or not
    /// `target_id` exists.
    ///
    /// # Returns
    /// - `Ok(User)` - The requesting user
    /// - `Err(AuthError::UserNotInSession)` - Request is anonymous (401)
    /// - `Err(AuthError::AccessDenied)` - Neither the target nor an admin (403)
    pub async fn require_self_or_admin(&self, target_id: &str) -> Result<User, AppError> {
        let user = self.require(&[]).await?;

        let is_self = target_id.trim().parse::<i32>().ok() == Some(user.id);
        if !is_self && !user.is_admin() {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User attempted to act on user {} without admin permission", target_id),
            )
            .into());
        }

        Ok(user)
    }
}
