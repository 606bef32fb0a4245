//! Contact message domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::pipeline::record::{MergePolicy, Record, ReplyContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub name: String,
    pub subject: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    /// Replies sent to the sender, oldest first.
    pub reply: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Message {
    const LABEL: &'static str = "Message";
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("name", MergePolicy::Immutable),
        ("subject", MergePolicy::Immutable),
        ("email", MergePolicy::Immutable),
        ("message", MergePolicy::Immutable),
        ("read", MergePolicy::Replace),
        ("reply", MergePolicy::Notify),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn reply_context(&self) -> Option<ReplyContext> {
        Some(ReplyContext {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
        })
    }
}

impl Message {
    /// Converts a message row and its replies, ordering the thread by position.
    pub fn from_entity(
        entity: entity::message::Model,
        mut replies: Vec<entity::message_reply::Model>,
    ) -> Self {
        replies.sort_by_key(|r| r.position);

        Self {
            id: entity.id,
            name: entity.name,
            subject: entity.subject,
            email: entity.email,
            message: entity.message,
            read: entity.read,
            reply: replies.into_iter().map(|r| r.body).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMessageParams {
    pub name: String,
    pub subject: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageFilter {
    pub read: Option<bool>,
}
