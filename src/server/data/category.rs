//! Category repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::set_if,
    model::{
        category::{Category, CreateCategoryParams},
        page::Page,
    },
    pipeline::{mutator::Mutation, record::Repository},
};

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a category.
    ///
    /// # Returns
    /// - `Ok(Category)` - The stored category
    /// - `Err(DbErr)` - Insert failed, including a unique violation on `title`
    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, DbErr> {
        let now = Utc::now();
        let entity = entity::category::ActiveModel {
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id).one(self.db).await?;
        Ok(entity.map(Category::from_entity))
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find()
            .filter(entity::category::Column::Title.eq(title))
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Gets one page of categories ordered by title.
    pub async fn find(&self, page: Page) -> Result<(Vec<Category>, u64), DbErr> {
        let paginator = entity::prelude::Category::find()
            .order_by_asc(entity::category::Column::Title)
            .paginate(self.db, page.size());

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((entities.into_iter().map(Category::from_entity).collect(), total))
    }

    /// Writes the changed columns of a category.
    pub async fn save(&self, mutation: &Mutation<Category>) -> Result<Category, DbErr> {
        let category = &mutation.record;
        let entity = entity::category::ActiveModel {
            id: ActiveValue::Unchanged(category.id),
            title: set_if(mutation, "title", category.title.clone()),
            description: set_if(mutation, "description", category.description.clone()),
            created_at: ActiveValue::NotSet,
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .update(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    /// Deletes a category; article and project links to it cascade.
    pub async fn delete(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let Some(category) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::Category::delete_by_id(id).exec(self.db).await?;

        Ok(Some(category))
    }
}

/// Resolves category titles to ids on `conn`, creating missing categories.
///
/// Blank titles are skipped and repeated titles resolve once, in first-seen order.
/// Run inside the caller's transaction so new categories commit together with the
/// record linking them.
pub(crate) async fn resolve_titles<C: ConnectionTrait>(
    conn: &C,
    titles: &[String],
) -> Result<Vec<i32>, DbErr> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        let category = find_or_insert(conn, title).await?;
        if !ids.contains(&category.id) {
            ids.push(category.id);
        }
    }

    Ok(ids)
}

async fn find_or_insert<C: ConnectionTrait>(
    conn: &C,
    title: &str,
) -> Result<entity::category::Model, DbErr> {
    let existing = entity::prelude::Category::find()
        .filter(entity::category::Column::Title.eq(title))
        .one(conn)
        .await?;
    if let Some(category) = existing {
        return Ok(category);
    }

    tracing::debug!("Creating category '{}' on demand", title);

    let now = Utc::now();
    entity::category::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

#[async_trait]
impl Repository for CategoryRepository<'_> {
    type Record = Category;

    async fn find_one(&self, id: i32) -> Result<Option<Category>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<Category>) -> Result<Category, DbErr> {
        CategoryRepository::save(self, mutation).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<Category>, DbErr> {
        self.delete(id).await
    }
}
