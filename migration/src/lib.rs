pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_user_token_table;
mod m20260105_000003_create_message_table;
mod m20260105_000004_create_message_reply_table;
mod m20260105_000005_create_category_table;
mod m20260105_000006_create_article_table;
mod m20260105_000007_create_article_category_table;
mod m20260105_000008_create_comment_table;
mod m20260105_000009_create_comment_vote_table;
mod m20260105_000010_create_project_table;
mod m20260105_000011_create_project_category_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_user_token_table::Migration),
            Box::new(m20260105_000003_create_message_table::Migration),
            Box::new(m20260105_000004_create_message_reply_table::Migration),
            Box::new(m20260105_000005_create_category_table::Migration),
            Box::new(m20260105_000006_create_article_table::Migration),
            Box::new(m20260105_000007_create_article_category_table::Migration),
            Box::new(m20260105_000008_create_comment_table::Migration),
            Box::new(m20260105_000009_create_comment_vote_table::Migration),
            Box::new(m20260105_000010_create_project_table::Migration),
            Box::new(m20260105_000011_create_project_category_table::Migration),
        ]
    }
}
