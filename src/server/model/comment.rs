//! Comment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::pipeline::record::{MergePolicy, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub user: i32,
    pub vote: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub article: i32,
    pub author: Option<i32>,
    /// Comment this one replies to.
    pub parent: Option<i32>,
    pub comment: String,
    pub read: bool,
    pub votes: Vec<Vote>,
    /// Ids of direct replies.
    pub reply: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Comment {
    const LABEL: &'static str = "Comment";
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("article", MergePolicy::Immutable),
        ("author", MergePolicy::Immutable),
        ("parent", MergePolicy::Immutable),
        ("comment", MergePolicy::Replace),
        ("read", MergePolicy::Replace),
        ("votes", MergePolicy::Computed),
        ("reply", MergePolicy::Computed),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

impl Comment {
    pub fn from_entity(
        entity: entity::comment::Model,
        votes: Vec<entity::comment_vote::Model>,
        reply: Vec<i32>,
    ) -> Self {
        Self {
            id: entity.id,
            article: entity.article_id,
            author: entity.author_id,
            parent: entity.parent_id,
            comment: entity.comment,
            read: entity.read,
            votes: votes
                .into_iter()
                .map(|v| Vote {
                    user: v.user_id,
                    vote: v.vote,
                })
                .collect(),
            reply,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Sum of every vote.
    pub fn score(&self) -> i32 {
        self.votes.iter().map(|v| v.vote).sum()
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub article: i32,
    pub author: Option<i32>,
    pub parent: Option<i32>,
    pub comment: String,
}
