//! Article domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::{
    model::image::Image,
    pipeline::record::{MergePolicy, Record},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i32,
    pub title: String,
    /// URL key derived from the title at creation.
    pub slug: String,
    pub image: Option<Image>,
    pub summary: String,
    pub content: String,
    pub featured: bool,
    /// Category ids.
    pub categories: Vec<i32>,
    /// Author user id; `None` once the author is deleted.
    pub author: Option<i32>,
    /// Ids of every comment on the article.
    pub comments: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Article {
    const LABEL: &'static str = "Article";
    const POLICIES: &'static [(&'static str, MergePolicy)] = &[
        ("id", MergePolicy::Immutable),
        ("title", MergePolicy::Replace),
        ("slug", MergePolicy::Immutable),
        ("image", MergePolicy::Upload { folder: "articles" }),
        ("summary", MergePolicy::Replace),
        ("content", MergePolicy::Replace),
        ("featured", MergePolicy::Replace),
        ("categories", MergePolicy::AppendSet),
        ("author", MergePolicy::Immutable),
        ("comments", MergePolicy::Computed),
        ("created_at", MergePolicy::Computed),
        ("updated_at", MergePolicy::Computed),
    ];

    fn id(&self) -> i32 {
        self.id
    }
}

impl Article {
    /// Converts an article row plus its category links and comment ids.
    pub fn from_entity(
        entity: entity::article::Model,
        categories: Vec<entity::article_category::Model>,
        comments: Vec<i32>,
    ) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            image: Image::from_columns(entity.image_path, entity.image_width, entity.image_height),
            summary: entity.summary,
            content: entity.content,
            featured: entity.featured,
            categories: sorted_ids(categories.into_iter().map(|c| c.category_id)),
            author: entity.author_id,
            comments,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateArticleParams {
    pub title: String,
    pub slug: String,
    pub image: Option<Image>,
    pub summary: String,
    pub content: String,
    pub featured: bool,
    pub categories: Vec<i32>,
    pub author: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFilter {
    pub featured: Option<bool>,
    /// Only articles linked to this category id.
    pub category: Option<i32>,
}

/// Collects category ids in ascending order so stored and freshly saved aggregates agree.
pub(crate) fn sorted_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
