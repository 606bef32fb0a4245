use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::pipeline::record::{MergePolicy, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Category {
    const LABEL: &'static str = "Category";
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("title", MergePolicy::Replace),
        ("description", MergePolicy::Replace),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

impl Category {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub title: String,
    pub description: Option<String>,
}
