use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000005_create_category_table::Category,
    m20260105_000006_create_article_table::Article,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArticleCategory::Table)
                    .if_not_exists()
                    .col(integer(ArticleCategory::ArticleId))
                    .col(integer(ArticleCategory::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(ArticleCategory::ArticleId)
                            .col(ArticleCategory::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_category_article_id")
                            .from(ArticleCategory::Table, ArticleCategory::ArticleId)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_category_category_id")
                            .from(ArticleCategory::Table, ArticleCategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ArticleCategory {
    Table,
    ArticleId,
    CategoryId,
}
