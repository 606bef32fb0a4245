//! Articles and their comment threads.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::{article::ArticleRepository, comment::CommentRepository},
    error::AppError,
    model::{
        article::{Article, ArticleFilter, CreateArticleParams},
        comment::{Comment, CreateCommentParams},
        page::Page,
        user::User,
    },
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
    util::slug::slugify,
};

/// Highest numeric suffix tried when a slug is taken.
const MAX_SLUG_SUFFIX: u32 = 100;

pub struct ArticleService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> ArticleService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    /// Creates an article from validated `article` input, authored by `author`.
    ///
    /// The slug is derived from the title with a numeric suffix when taken. An
    /// `image` is uploaded before the article is stored.
    ///
    /// # Returns
    /// - `Ok(Article)` - The new article
    /// - `Err(AppError::BadRequest)` - A category does not exist
    /// - `Err(AppError::StorageErr)` - Upload failed; nothing is stored
    pub async fn create(&self, author: &User, mut input: Normalized) -> Result<Article, AppError> {
        let repo = ArticleRepository::new(self.db);

        let title = input.take_string("title").unwrap_or_default();
        let slug = self.unique_slug(&repo, &title).await?;

        let image = match input.take_asset("image") {
            Some(asset) => Some(
                self.collaborators
                    .dispatcher()
                    .upload_new::<Article>("image", &asset)
                    .await?,
            ),
            None => None,
        };

        let article = repo
            .create(CreateArticleParams {
                title,
                slug,
                image,
                summary: input.take_string("summary").unwrap_or_default(),
                content: input.take_string("content").unwrap_or_default(),
                featured: input.take_bool("featured").unwrap_or(false),
                categories: input.take_i32_list("categories").unwrap_or_default(),
                author: Some(author.id),
            })
            .await?;

        tracing::info!("User {} created article {} '{}'", author.id, article.id, article.slug);

        Ok(article)
    }

    async fn unique_slug(&self, repo: &ArticleRepository<'_>, title: &str) -> Result<String, AppError> {
        let base = slugify(title);
        if !repo.slug_exists(&base).await? {
            return Ok(base);
        }

        for suffix in 2..=MAX_SLUG_SUFFIX {
            let candidate = format!("{}-{}", base, suffix);
            if !repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::Conflict(format!("slug {} already exists", base)))
    }

    pub async fn list(
        &self,
        filter: ArticleFilter,
        page: Page,
    ) -> Result<(Vec<Article>, u64), AppError> {
        Ok(ArticleRepository::new(self.db).find(filter, page).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Article, AppError> {
        RecordLoader::new(&ArticleRepository::new(self.db))
            .load(id)
            .await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Article, AppError> {
        ArticleRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    /// Applies validated `article_update` input.
    ///
    /// Categories change through `{action, value}` entries; a new `image` replaces the
    /// old one only after it is uploaded.
    pub async fn update(&self, id: &str, input: Normalized) -> Result<Article, AppError> {
        let repo = ArticleRepository::new(self.db);
        UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .run(id, input.into_patch())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Article, AppError> {
        let repo = ArticleRepository::new(self.db);
        let article = RecordLoader::new(&repo).load(id).await?;

        repo.delete(article.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    /// Every comment on an article, oldest first.
    pub async fn comments(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        let article = self.get(article_id).await?;

        Ok(CommentRepository::new(self.db)
            .find_by_article(article.id)
            .await?)
    }

    /// Adds a comment from validated `comment` input, optionally replying to `parent`.
    ///
    /// # Returns
    /// - `Ok(Comment)` - The new comment
    /// - `Err(AppError::NotFound)` - No such article
    /// - `Err(AppError::BadRequest)` - The parent comment is missing or belongs to another
    ///   article
    pub async fn add_comment(
        &self,
        article_id: &str,
        author: &User,
        mut input: Normalized,
    ) -> Result<Comment, AppError> {
        let article = self.get(article_id).await?;
        let comments = CommentRepository::new(self.db);

        let parent = input.take_i32("parent");
        if let Some(parent_id) = parent {
            match comments.find_by_id(parent_id).await? {
                Some(parent) if parent.article == article.id => {}
                _ => {
                    return Err(AppError::BadRequest(
                        "Parent comment does not belong to this article".to_string(),
                    ))
                }
            }
        }

        let comment = comments
            .create(CreateCommentParams {
                article: article.id,
                author: Some(author.id),
                parent,
                comment: input.take_string("comment").unwrap_or_default(),
            })
            .await?;

        tracing::debug!("User {} commented {} on article {}", author.id, comment.id, article.id);

        Ok(comment)
    }
}
