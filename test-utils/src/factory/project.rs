//! Project factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ProjectFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    link: String,
    published: bool,
    featured: bool,
    categories: Vec<i32>,
}

impl<'a> ProjectFactory<'a> {
    /// Defaults to a published, unfeatured project without categories.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Project {}", id),
            link: format!("https://example.com/project-{}", id),
            published: true,
            featured: false,
            categories: Vec::new(),
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.categories.push(category_id);
        self
    }

    pub async fn build(self) -> Result<entity::project::Model, DbErr> {
        let now = Utc::now();
        let project = entity::project::ActiveModel {
            title: ActiveValue::Set(self.title),
            summary: ActiveValue::Set("A project".to_string()),
            link: ActiveValue::Set(self.link),
            image_path: ActiveValue::Set(None),
            image_width: ActiveValue::Set(None),
            image_height: ActiveValue::Set(None),
            published: ActiveValue::Set(self.published),
            featured: ActiveValue::Set(self.featured),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for category_id in self.categories {
            entity::project_category::ActiveModel {
                project_id: ActiveValue::Set(project.id),
                category_id: ActiveValue::Set(category_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(project)
    }
}

pub async fn create_project(db: &DatabaseConnection) -> Result<entity::project::Model, DbErr> {
    ProjectFactory::new(db).build().await
}
