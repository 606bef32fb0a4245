//! Project repository.
//!
//! A project aggregate is the `project` row plus its `project_category` links.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::{category::resolve_titles, group_by, set_if},
    model::{
        article::sorted_ids,
        image::Image,
        page::Page,
        project::{CreateProjectParams, Project, ProjectFilter},
    },
    pipeline::{mutator::Mutation, record::Repository},
};

pub struct ProjectRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a project and its category links in one transaction.
    ///
    /// Category titles are resolved in the same transaction, so categories created for
    /// them are discarded when the insert fails.
    pub async fn create(&self, params: CreateProjectParams) -> Result<Project, DbErr> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let (path, width, height) = Image::into_columns(params.image);
        let entity = entity::project::ActiveModel {
            title: ActiveValue::Set(params.title),
            summary: ActiveValue::Set(params.summary),
            link: ActiveValue::Set(params.link),
            image_path: ActiveValue::Set(path),
            image_width: ActiveValue::Set(width),
            image_height: ActiveValue::Set(height),
            published: ActiveValue::Set(params.published),
            featured: ActiveValue::Set(params.featured),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let categories = resolve_titles(&txn, &params.categories).await?;
        let links = link_categories(&txn, entity.id, &categories).await?;

        txn.commit().await?;

        Ok(Project::from_entity(entity, links))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Project>, DbErr> {
        let entity = entity::prelude::Project::find_by_id(id).one(self.db).await?;

        Ok(hydrate_all(self.db, entity.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    /// Gets one page of projects, newest first.
    pub async fn find(
        &self,
        filter: ProjectFilter,
        page: Page,
    ) -> Result<(Vec<Project>, u64), DbErr> {
        let mut query = entity::prelude::Project::find();
        if let Some(published) = filter.published {
            query = query.filter(entity::project::Column::Published.eq(published));
        }
        if let Some(featured) = filter.featured {
            query = query.filter(entity::project::Column::Featured.eq(featured));
        }

        let paginator = query
            .order_by_desc(entity::project::Column::CreatedAt)
            .order_by_desc(entity::project::Column::Id)
            .paginate(self.db, page.size());

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((hydrate_all(self.db, entities).await?, total))
    }

    /// Commits a project mutation in one transaction.
    ///
    /// When `category_titles` is given they are resolved (creating missing categories)
    /// and replace the category links; otherwise the links are replaced only if the
    /// mutation changed `categories`.
    ///
    /// # Returns
    /// - `Ok(Project)` - The project as committed
    /// - `Err(DbErr)` - Write failed; no category or project change is committed
    pub async fn update(
        &self,
        mutation: &Mutation<Project>,
        category_titles: Option<&[String]>,
    ) -> Result<Project, DbErr> {
        let project = &mutation.record;
        let txn = self.db.begin().await?;

        let categories = match category_titles {
            Some(titles) => Some(resolve_titles(&txn, titles).await?),
            None if mutation.touches("categories") => Some(project.categories.clone()),
            None => None,
        };

        let (path, width, height) = Image::into_columns(project.image.clone());
        let entity = entity::project::ActiveModel {
            id: ActiveValue::Unchanged(project.id),
            title: set_if(mutation, "title", project.title.clone()),
            summary: set_if(mutation, "summary", project.summary.clone()),
            link: set_if(mutation, "link", project.link.clone()),
            image_path: set_if(mutation, "image", path),
            image_width: set_if(mutation, "image", width),
            image_height: set_if(mutation, "image", height),
            published: set_if(mutation, "published", project.published),
            featured: set_if(mutation, "featured", project.featured),
            created_at: ActiveValue::NotSet,
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .update(&txn)
        .await?;

        if let Some(categories) = categories {
            entity::prelude::ProjectCategory::delete_many()
                .filter(entity::project_category::Column::ProjectId.eq(project.id))
                .exec(&txn)
                .await?;
            link_categories(&txn, project.id, &categories).await?;
        }

        let project = hydrate_all(&txn, vec![entity])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbErr::RecordNotFound(format!("Project {} not found", project.id)))?;
        txn.commit().await?;

        Ok(project)
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Project>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::Project::delete_by_id(id).exec(self.db).await?;

        Ok(Some(project))
    }
}

#[async_trait]
impl Repository for ProjectRepository<'_> {
    type Record = Project;

    async fn find_one(&self, id: i32) -> Result<Option<Project>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<Project>) -> Result<Project, DbErr> {
        self.update(mutation, None).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<Project>, DbErr> {
        self.delete(id).await
    }
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    project_id: i32,
    categories: &[i32],
) -> Result<Vec<entity::project_category::Model>, DbErr> {
    let mut links = Vec::with_capacity(categories.len());
    for category_id in sorted_ids(categories.iter().copied()) {
        let link = entity::project_category::ActiveModel {
            project_id: ActiveValue::Set(project_id),
            category_id: ActiveValue::Set(category_id),
        }
        .insert(conn)
        .await?;
        links.push(link);
    }
    Ok(links)
}

async fn hydrate_all<C: ConnectionTrait>(
    conn: &C,
    entities: Vec<entity::project::Model>,
) -> Result<Vec<Project>, DbErr> {
    if entities.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
    let links = entity::prelude::ProjectCategory::find()
        .filter(entity::project_category::Column::ProjectId.is_in(ids))
        .all(conn)
        .await?;
    let mut links = group_by(links, |l| l.project_id);

    Ok(entities
        .into_iter()
        .map(|e| {
            let categories = links.remove(&e.id).unwrap_or_default();
            Project::from_entity(e, categories)
        })
        .collect())
}
