//! Contact message repository.
//!
//! A message aggregate is the `message` row plus its ordered `message_reply` rows.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde_json::Value;

use crate::server::{
    data::{group_by, set_if},
    model::{
        message::{CreateMessageParams, Message, MessageFilter},
        page::Page,
    },
    pipeline::{
        mutator::{ItemChange, Mutation},
        record::Repository,
    },
};

pub struct MessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new unread message with an empty reply thread.
    pub async fn create(&self, params: CreateMessageParams) -> Result<Message, DbErr> {
        let now = Utc::now();
        let entity = entity::message::ActiveModel {
            name: ActiveValue::Set(params.name),
            subject: ActiveValue::Set(params.subject),
            email: ActiveValue::Set(params.email),
            message: ActiveValue::Set(params.message),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Message::from_entity(entity, Vec::new()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Message>, DbErr> {
        let Some(entity) = entity::prelude::Message::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let replies = replies_of(self.db, vec![entity.id]).await?;

        Ok(Some(Message::from_entity(entity, replies)))
    }

    /// Gets one page of messages, newest first and unread before read on ties.
    ///
    /// # Returns
    /// - `Ok((messages, total))` - Messages of the requested page and the number of matches
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn find(
        &self,
        filter: MessageFilter,
        page: Page,
    ) -> Result<(Vec<Message>, u64), DbErr> {
        let mut query = entity::prelude::Message::find();
        if let Some(read) = filter.read {
            query = query.filter(entity::message::Column::Read.eq(read));
        }

        let paginator = query
            .order_by_desc(entity::message::Column::CreatedAt)
            .order_by_asc(entity::message::Column::Read)
            .order_by_desc(entity::message::Column::Id)
            .paginate(self.db, page.size());

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        let ids = entities.iter().map(|e| e.id).collect();
        let mut replies = group_by(replies_of(self.db, ids).await?, |r| r.message_id);

        let messages = entities
            .into_iter()
            .map(|e| {
                let thread = replies.remove(&e.id).unwrap_or_default();
                Message::from_entity(e, thread)
            })
            .collect();

        Ok((messages, total))
    }

    /// Commits a message mutation in one transaction.
    ///
    /// Only `read` is written on the row; the other columns are fixed once a message
    /// exists. Pushed replies are appended after the replies already stored.
    pub async fn save(&self, mutation: &Mutation<Message>) -> Result<Message, DbErr> {
        let message = &mutation.record;
        let txn = self.db.begin().await?;

        let entity = entity::message::ActiveModel {
            id: ActiveValue::Unchanged(message.id),
            read: set_if(mutation, "read", message.read),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        for change in mutation.items_of("reply") {
            match change {
                ItemChange::Pushed(Value::String(body)) => {
                    let position = entity::prelude::MessageReply::find()
                        .filter(entity::message_reply::Column::MessageId.eq(message.id))
                        .count(&txn)
                        .await?;

                    entity::message_reply::ActiveModel {
                        message_id: ActiveValue::Set(message.id),
                        position: ActiveValue::Set(position as i32),
                        body: ActiveValue::Set(body.clone()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                }
                other => tracing::debug!("Ignoring reply edit {:?} for message {}", other, message.id),
            }
        }

        let replies = replies_of(&txn, vec![message.id]).await?;
        txn.commit().await?;

        Ok(Message::from_entity(entity, replies))
    }

    /// Deletes a message and its replies.
    pub async fn delete(&self, id: i32) -> Result<Option<Message>, DbErr> {
        let Some(message) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::Message::delete_by_id(id).exec(self.db).await?;

        Ok(Some(message))
    }
}

#[async_trait]
impl Repository for MessageRepository<'_> {
    type Record = Message;

    async fn find_one(&self, id: i32) -> Result<Option<Message>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<Message>) -> Result<Message, DbErr> {
        MessageRepository::save(self, mutation).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<Message>, DbErr> {
        self.delete(id).await
    }
}

async fn replies_of<C: ConnectionTrait>(
    conn: &C,
    message_ids: Vec<i32>,
) -> Result<Vec<entity::message_reply::Model>, DbErr> {
    entity::prelude::MessageReply::find()
        .filter(entity::message_reply::Column::MessageId.is_in(message_ids))
        .order_by_asc(entity::message_reply::Column::Position)
        .all(conn)
        .await
}
