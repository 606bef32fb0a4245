//! Portfolio project domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::{
    model::{article::sorted_ids, image::Image},
    pipeline::record::{MergePolicy, Record},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub image: Option<Image>,
    /// Category ids, resolved from titles on write.
    pub categories: Vec<i32>,
    pub published: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Project {
    const LABEL: &'static str = "Project";
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("title", MergePolicy::Replace),
        ("summary", MergePolicy::Replace),
        ("link", MergePolicy::Replace),
        ("image", MergePolicy::Upload { folder: "projects" }),
        ("categories", MergePolicy::Replace),
        ("published", MergePolicy::Replace),
        ("featured", MergePolicy::Replace),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

impl Project {
    pub fn from_entity(
        entity: entity::project::Model,
        categories: Vec<entity::project_category::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            summary: entity.summary,
            link: entity.link,
            image: Image::from_columns(entity.image_path, entity.image_width, entity.image_height),
            categories: sorted_ids(categories.into_iter().map(|c| c.category_id)),
            published: entity.published,
            featured: entity.featured,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateProjectParams {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub image: Option<Image>,
    /// Category titles, created when missing.
    pub categories: Vec<String>,
    pub published: bool,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub published: Option<bool>,
    pub featured: Option<bool>,
}
