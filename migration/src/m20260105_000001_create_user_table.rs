use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Name))
                    .col(string_uniq(User::Username))
                    .col(string_uniq(User::Email))
                    .col(string(User::Password))
                    .col(string(User::Role))
                    .col(boolean(User::Verified))
                    .col(string_null(User::Keywords))
                    .col(text_null(User::Summary))
                    .col(text_null(User::Info))
                    .col(text_null(User::About))
                    .col(string_null(User::ProfilePicPath))
                    .col(integer_null(User::ProfilePicWidth))
                    .col(integer_null(User::ProfilePicHeight))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Name,
    Username,
    Email,
    Password,
    Role,
    Verified,
    Keywords,
    Summary,
    Info,
    About,
    ProfilePicPath,
    ProfilePicWidth,
    ProfilePicHeight,
    CreatedAt,
    UpdatedAt,
}
