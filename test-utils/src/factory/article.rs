//! Article factory.
//!
//! Articles may be linked to categories; the links are inserted after the article row.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ArticleFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    summary: String,
    content: String,
    featured: bool,
    author_id: Option<i32>,
    categories: Vec<i32>,
}

impl<'a> ArticleFactory<'a> {
    /// Defaults to an unfeatured article without author or categories.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Article {}", id),
            slug: format!("article-{}", id),
            summary: "A short summary".to_string(),
            content: "Some content".to_string(),
            featured: false,
            author_id: None,
            categories: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn author(mut self, user_id: i32) -> Self {
        self.author_id = Some(user_id);
        self
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.categories.push(category_id);
        self
    }

    pub async fn build(self) -> Result<entity::article::Model, DbErr> {
        let now = Utc::now();
        let article = entity::article::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            image_path: ActiveValue::Set(None),
            image_width: ActiveValue::Set(None),
            image_height: ActiveValue::Set(None),
            summary: ActiveValue::Set(self.summary),
            content: ActiveValue::Set(self.content),
            featured: ActiveValue::Set(self.featured),
            author_id: ActiveValue::Set(self.author_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for category_id in self.categories {
            entity::article_category::ActiveModel {
                article_id: ActiveValue::Set(article.id),
                category_id: ActiveValue::Set(category_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(article)
    }
}

pub async fn create_article(db: &DatabaseConnection) -> Result<entity::article::Model, DbErr> {
    ArticleFactory::new(db).build().await
}
