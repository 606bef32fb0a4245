use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(pk_auto(Project::Id))
                    .col(string(Project::Title))
                    .col(text(Project::Summary))
                    .col(string(Project::Link))
                    .col(string_null(Project::ImagePath))
                    .col(integer_null(Project::ImageWidth))
                    .col(integer_null(Project::ImageHeight))
                    .col(boolean(Project::Published))
                    .col(boolean(Project::Featured))
                    .col(timestamp_with_time_zone(Project::CreatedAt))
                    .col(timestamp_with_time_zone(Project::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Project {
    Table,
    Id,
    Title,
    Summary,
    Link,
    ImagePath,
    ImageWidth,
    ImageHeight,
    Published,
    Featured,
    CreatedAt,
    UpdatedAt,
}
