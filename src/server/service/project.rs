//! Portfolio projects.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::project::ProjectRepository,
    error::AppError,
    model::{
        page::Page,
        project::{CreateProjectParams, Project, ProjectFilter},
    },
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
};

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    /// Creates a project from validated `project` input.
    ///
    /// The image is uploaded first. Category titles are then resolved to existing
    /// categories, creating missing ones in the same commit as the project.
    pub async fn create(&self, mut input: Normalized) -> Result<Project, AppError> {
        let categories = input.take_string_list("categories").unwrap_or_default();

        let image = match input.take_asset("image") {
            Some(asset) => Some(
                self.collaborators
                    .dispatcher()
                    .upload_new::<Project>("image", &asset)
                    .await?,
            ),
            None => None,
        };

        let project = ProjectRepository::new(self.db)
            .create(CreateProjectParams {
                title: input.take_string("title").unwrap_or_default(),
                summary: input.take_string("summary").unwrap_or_default(),
                link: input.take_string("link").unwrap_or_default(),
                image,
                categories,
                published: input.take_bool("published").unwrap_or(false),
                featured: input.take_bool("featured").unwrap_or(false),
            })
            .await?;

        tracing::info!("Created project {}", project.id);

        Ok(project)
    }

    pub async fn list(
        &self,
        filter: ProjectFilter,
        page: Page,
    ) -> Result<(Vec<Project>, u64), AppError> {
        Ok(ProjectRepository::new(self.db).find(filter, page).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Project, AppError> {
        RecordLoader::new(&ProjectRepository::new(self.db))
            .load(id)
            .await
    }

    /// Applies validated `project_update` input; `categories` titles replace the set.
    ///
    /// Categories are resolved only after the image upload succeeded, inside the
    /// transaction that writes the project.
    pub async fn update(&self, id: &str, mut input: Normalized) -> Result<Project, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = RecordLoader::new(&repo).load(id).await?;

        let titles = input.take_string_list("categories");
        let mutation = UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .prepare(&project, input.into_patch())
            .await?;

        if mutation.is_unchanged() && titles.is_none() {
            return Ok(mutation.record);
        }

        Ok(repo.update(&mutation, titles.as_deref()).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<Project, AppError> {
        let repo = ProjectRepository::new(self.db);
        let project = RecordLoader::new(&repo).load(id).await?;

        repo.delete(project.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }
}
