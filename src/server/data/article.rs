//! Article repository.
//!
//! An article aggregate is the `article` row plus its `article_category` links. Comment
//! ids are read alongside but written only through the comment repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde_json::Value;

use crate::server::{
    data::{group_by, set_if},
    model::{
        article::{sorted_ids, Article, ArticleFilter, CreateArticleParams},
        image::Image,
        page::Page,
    },
    pipeline::{
        mutator::{ItemChange, Mutation},
        record::Repository,
    },
};

pub struct ArticleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArticleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an article and its category links in one transaction.
    ///
    /// # Returns
    /// - `Ok(Article)` - The stored article
    /// - `Err(DbErr)` - Insert failed; a duplicate slug is a unique violation and an
    ///   unknown category or author a foreign key violation
    pub async fn create(&self, params: CreateArticleParams) -> Result<Article, DbErr> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let (path, width, height) = Image::into_columns(params.image);
        let entity = entity::article::ActiveModel {
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            image_path: ActiveValue::Set(path),
            image_width: ActiveValue::Set(width),
            image_height: ActiveValue::Set(height),
            summary: ActiveValue::Set(params.summary),
            content: ActiveValue::Set(params.content),
            featured: ActiveValue::Set(params.featured),
            author_id: ActiveValue::Set(params.author),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let links = link_categories(&txn, entity.id, &params.categories).await?;

        txn.commit().await?;

        Ok(Article::from_entity(entity, links, Vec::new()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Article>, DbErr> {
        let entity = entity::prelude::Article::find_by_id(id).one(self.db).await?;

        Ok(hydrate_all(self.db, entity.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, DbErr> {
        let entity = entity::prelude::Article::find()
            .filter(entity::article::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(hydrate_all(self.db, entity.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Article::find()
            .filter(entity::article::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets one page of articles, newest first.
    ///
    /// # Returns
    /// - `Ok((articles, total))` - Articles of the requested page and the number of matches
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn find(
        &self,
        filter: ArticleFilter,
        page: Page,
    ) -> Result<(Vec<Article>, u64), DbErr> {
        let mut query = entity::prelude::Article::find();

        if let Some(featured) = filter.featured {
            query = query.filter(entity::article::Column::Featured.eq(featured));
        }

        if let Some(category_id) = filter.category {
            let article_ids: Vec<i32> = entity::prelude::ArticleCategory::find()
                .filter(entity::article_category::Column::CategoryId.eq(category_id))
                .all(self.db)
                .await?
                .into_iter()
                .map(|link| link.article_id)
                .collect();

            query = query.filter(entity::article::Column::Id.is_in(article_ids));
        }

        let paginator = query
            .order_by_desc(entity::article::Column::CreatedAt)
            .order_by_desc(entity::article::Column::Id)
            .paginate(self.db, page.size());

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((hydrate_all(self.db, entities).await?, total))
    }

    /// Commits an article mutation in one transaction.
    ///
    /// Slug and author are fixed after creation and never written. Category edits
    /// insert or delete single links; adding a link that already exists is a no-op.
    pub async fn save(&self, mutation: &Mutation<Article>) -> Result<Article, DbErr> {
        let article = &mutation.record;
        let txn = self.db.begin().await?;

        let (path, width, height) = Image::into_columns(article.image.clone());
        let entity = entity::article::ActiveModel {
            id: ActiveValue::Unchanged(article.id),
            title: set_if(mutation, "title", article.title.clone()),
            image_path: set_if(mutation, "image", path),
            image_width: set_if(mutation, "image", width),
            image_height: set_if(mutation, "image", height),
            summary: set_if(mutation, "summary", article.summary.clone()),
            content: set_if(mutation, "content", article.content.clone()),
            featured: set_if(mutation, "featured", article.featured),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        for change in mutation.items_of("categories") {
            match change {
                ItemChange::Added(id) => {
                    if let Some(category_id) = category_id(id) {
                        link_category(&txn, article.id, category_id).await?;
                    }
                }
                ItemChange::Removed(id) => {
                    if let Some(category_id) = category_id(id) {
                        entity::prelude::ArticleCategory::delete_many()
                            .filter(entity::article_category::Column::ArticleId.eq(article.id))
                            .filter(entity::article_category::Column::CategoryId.eq(category_id))
                            .exec(&txn)
                            .await?;
                    }
                }
                ItemChange::Replaced(ids) => {
                    entity::prelude::ArticleCategory::delete_many()
                        .filter(entity::article_category::Column::ArticleId.eq(article.id))
                        .exec(&txn)
                        .await?;
                    for category_id in ids.iter().filter_map(category_id) {
                        link_category(&txn, article.id, category_id).await?;
                    }
                }
                ItemChange::Pushed(_) => {}
            }
        }

        let article = hydrate_all(&txn, vec![entity])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbErr::RecordNotFound(format!("Article {} not found", article.id)))?;
        txn.commit().await?;

        Ok(article)
    }

    /// Deletes an article; its category links and comments cascade.
    pub async fn delete(&self, id: i32) -> Result<Option<Article>, DbErr> {
        let Some(article) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::Article::delete_by_id(id).exec(self.db).await?;

        Ok(Some(article))
    }
}

#[async_trait]
impl Repository for ArticleRepository<'_> {
    type Record = Article;

    async fn find_one(&self, id: i32) -> Result<Option<Article>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<Article>) -> Result<Article, DbErr> {
        ArticleRepository::save(self, mutation).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<Article>, DbErr> {
        self.delete(id).await
    }
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    article_id: i32,
    categories: &[i32],
) -> Result<Vec<entity::article_category::Model>, DbErr> {
    let mut links = Vec::with_capacity(categories.len());
    for category_id in sorted_ids(categories.iter().copied()) {
        let link = entity::article_category::ActiveModel {
            article_id: ActiveValue::Set(article_id),
            category_id: ActiveValue::Set(category_id),
        }
        .insert(conn)
        .await?;
        links.push(link);
    }
    Ok(links)
}

/// Links a category; a link that already exists is left as it is.
async fn link_category<C: ConnectionTrait>(
    conn: &C,
    article_id: i32,
    category_id: i32,
) -> Result<(), DbErr> {
    entity::prelude::ArticleCategory::insert(entity::article_category::ActiveModel {
        article_id: ActiveValue::Set(article_id),
        category_id: ActiveValue::Set(category_id),
    })
    .on_conflict(
        OnConflict::columns([
            entity::article_category::Column::ArticleId,
            entity::article_category::Column::CategoryId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .do_nothing()
    .exec(conn)
    .await?;

    Ok(())
}

fn category_id(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|id| i32::try_from(id).ok())
}

async fn comment_ids<C: ConnectionTrait>(
    conn: &C,
    article_ids: Vec<i32>,
) -> Result<Vec<entity::comment::Model>, DbErr> {
    entity::prelude::Comment::find()
        .filter(entity::comment::Column::ArticleId.is_in(article_ids))
        .order_by_asc(entity::comment::Column::Id)
        .all(conn)
        .await
}

async fn hydrate_all<C: ConnectionTrait>(
    conn: &C,
    entities: Vec<entity::article::Model>,
) -> Result<Vec<Article>, DbErr> {
    if entities.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();

    let links = entity::prelude::ArticleCategory::find()
        .filter(entity::article_category::Column::ArticleId.is_in(ids.clone()))
        .all(conn)
        .await?;
    let mut links = group_by(links, |l| l.article_id);
    let mut comments = group_by(comment_ids(conn, ids).await?, |c| c.article_id);

    Ok(entities
        .into_iter()
        .map(|e| {
            let categories = links.remove(&e.id).unwrap_or_default();
            let comments = comments
                .remove(&e.id)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.id)
                .collect();
            Article::from_entity(e, categories, comments)
        })
        .collect())
}
