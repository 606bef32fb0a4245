use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Collects the tables a test needs and creates them in a fresh in-memory database.
///
/// ```rust,ignore
/// let test = TestBuilder::new().with_message_tables().build().await?;
/// let db = test.db.as_ref().unwrap();
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Queues the SQLite CREATE TABLE statement derived from `entity`.
    ///
    /// Referenced tables must be queued before the tables pointing at them.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Users and their login tokens.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(UserToken)
    }

    /// Contact messages and their reply threads.
    pub fn with_message_tables(self) -> Self {
        self.with_table(Message).with_table(MessageReply)
    }

    /// Every table, users first so articles, comments and votes can reference them.
    pub fn with_content_tables(self) -> Self {
        self.with_user_tables()
            .with_message_tables()
            .with_table(Category)
            .with_table(Article)
            .with_table(ArticleCategory)
            .with_table(Comment)
            .with_table(CommentVote)
            .with_table(Project)
            .with_table(ProjectCategory)
    }

    /// Connects the in-memory database and creates the queued tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;
        Ok(context)
    }
}
