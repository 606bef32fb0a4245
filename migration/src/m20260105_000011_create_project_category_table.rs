use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000005_create_category_table::Category,
    m20260105_000010_create_project_table::Project,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectCategory::Table)
                    .if_not_exists()
                    .col(integer(ProjectCategory::ProjectId))
                    .col(integer(ProjectCategory::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(ProjectCategory::ProjectId)
                            .col(ProjectCategory::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_category_project_id")
                            .from(ProjectCategory::Table, ProjectCategory::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_category_category_id")
                            .from(ProjectCategory::Table, ProjectCategory::CategoryId)
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
            .drop_table(Table::drop().table(ProjectCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ProjectCategory {
    Table,
    ProjectId,
    CategoryId,
}
