//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is cheap to clone: the connection pool, schemas and
//! collaborators are reference counted.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{collaborator::Collaborators, pipeline::schemas::Schemas};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// Request schemas, validated once at startup.
    pub schemas: Arc<Schemas>,

    /// Asset storage and mailer used by side effects.
    pub collaborators: Collaborators,

    /// Signups with this email are granted the admin role.
    pub owner_email: Option<String>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        schemas: Schemas,
        collaborators: Collaborators,
        owner_email: Option<String>,
    ) -> Self {
        Self {
            db,
            schemas: Arc::new(schemas),
            collaborators,
            owner_email,
        }
    }
}
