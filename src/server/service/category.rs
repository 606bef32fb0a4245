//! Categories.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::{article::ArticleRepository, category::CategoryRepository},
    error::AppError,
    model::{
        article::{Article, ArticleFilter},
        category::{Category, CreateCategoryParams},
        page::Page,
    },
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    /// Creates a category from validated `category` input.
    ///
    /// # Returns
    /// - `Ok(Category)` - The new category
    /// - `Err(AppError::Conflict)` - Title already taken
    pub async fn create(&self, mut input: Normalized) -> Result<Category, AppError> {
        let category = CategoryRepository::new(self.db)
            .create(CreateCategoryParams {
                title: input.take_string("title").unwrap_or_default(),
                description: input.take_string("description"),
            })
            .await?;

        Ok(category)
    }

    pub async fn list(&self, page: Page) -> Result<(Vec<Category>, u64), AppError> {
        Ok(CategoryRepository::new(self.db).find(page).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Category, AppError> {
        RecordLoader::new(&CategoryRepository::new(self.db))
            .load(id)
            .await
    }

    /// Gets a category together with one page of its articles.
    pub async fn get_with_articles(
        &self,
        id: &str,
        page: Page,
    ) -> Result<(Category, Vec<Article>, u64), AppError> {
        let category = self.get(id).await?;

        let (articles, total) = ArticleRepository::new(self.db)
            .find(
                ArticleFilter {
                    featured: None,
                    category: Some(category.id),
                },
                page,
            )
            .await?;

        Ok((category, articles, total))
    }

    pub async fn update(&self, id: &str, input: Normalized) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);
        UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .run(id, input.into_patch())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);
        let category = RecordLoader::new(&repo).load(id).await?;

        repo.delete(category.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }
}
