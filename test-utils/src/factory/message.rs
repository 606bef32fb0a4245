//! Contact message factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating contact messages.
pub struct MessageFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    subject: String,
    email: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl<'a> MessageFactory<'a> {
    /// Defaults to an unread message from `"sender{id}@example.com"` created now.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Sender {}", id),
            subject: format!("Subject {}", id),
            email: format!("sender{}@example.com", id),
            message: "Hello there".to_string(),
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::message::Model, DbErr> {
        entity::message::ActiveModel {
            name: ActiveValue::Set(self.name),
            subject: ActiveValue::Set(self.subject),
            email: ActiveValue::Set(self.email),
            message: ActiveValue::Set(self.message),
            read: ActiveValue::Set(self.read),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unread message with default values.
pub async fn create_message(db: &DatabaseConnection) -> Result<entity::message::Model, DbErr> {
    MessageFactory::new(db).build().await
}

/// Appends a reply body to a message thread at the given position.
pub async fn create_message_reply(
    db: &DatabaseConnection,
    message_id: i32,
    position: i32,
    body: impl Into<String>,
) -> Result<entity::message_reply::Model, DbErr> {
    entity::message_reply::ActiveModel {
        message_id: ActiveValue::Set(message_id),
        position: ActiveValue::Set(position),
        body: ActiveValue::Set(body.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}
