//! User domain models and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::{
    model::image::Image,
    pipeline::record::{MergePolicy, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Admin => "admin",
        }
    }

    /// Parses the stored role column; anything unknown is treated as `Guest`.
    pub fn from_column(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "guest" => Role::Guest,
            other => {
                tracing::warn!("Unknown role '{}' stored, treating as guest", other);
                Role::Guest
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never plain text.
    pub password: String,
    pub role: Role,
    pub verified: bool,
    pub keywords: Option<String>,
    pub summary: Option<String>,
    pub info: Option<String>,
    pub about: Option<String>,
    pub profile_pic: Option<Image>,
    /// Bearer tokens of active logins.
    pub tokens: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for User {
    const LABEL: &'static str = "User";
    const SENSITIVE: &'static [&'static str] = &["password", "tokens"];
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("name", MergePolicy::Replace),
        ("username", MergePolicy::Replace),
        ("email", MergePolicy::Replace),
        ("password", MergePolicy::Replace),
        ("role", MergePolicy::Computed),
        ("verified", MergePolicy::Computed),
        ("keywords", MergePolicy::Replace),
        ("summary", MergePolicy::Replace),
        ("info", MergePolicy::Replace),
        ("about", MergePolicy::Replace),
        ("profile_pic", MergePolicy::Upload { folder: "profiles" }),
        ("tokens", MergePolicy::AppendSet),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

impl User {
    /// Converts entity models to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model, tokens: Vec<entity::user_token::Model>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            username: entity.username,
            email: entity.email,
            password: entity.password,
            role: Role::from_column(&entity.role),
            verified: entity.verified,
            keywords: entity.keywords,
            summary: entity.summary,
            info: entity.info,
            about: entity.about,
            profile_pic: Image::from_columns(
                entity.profile_pic_path,
                entity.profile_pic_width,
                entity.profile_pic_height,
            ),
            tokens: tokens.into_iter().map(|t| t.token).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Filter for listing users.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub role: Option<Role>,
}
