use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000003_create_message_table::Message;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MessageReply::Table)
                    .if_not_exists()
                    .col(pk_auto(MessageReply::Id))
                    .col(integer(MessageReply::MessageId))
                    .col(integer(MessageReply::Position))
                    .col(text(MessageReply::Body))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reply_message_id")
                            .from(MessageReply::Table, MessageReply::MessageId)
                            .to(Message::Table, Message::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MessageReply::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MessageReply {
    Table,
    Id,
    MessageId,
    Position,
    Body,
}
