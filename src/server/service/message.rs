//! Contact messages and replies.

use sea_orm::DatabaseConnection;

use crate::server::{
    collaborator::Collaborators,
    data::message::MessageRepository,
    error::AppError,
    model::{
        message::{CreateMessageParams, Message, MessageFilter},
        page::Page,
    },
    pipeline::{loader::RecordLoader, schema::Normalized, UpdatePipeline},
};

pub struct MessageService<'a> {
    db: &'a DatabaseConnection,
    collaborators: &'a Collaborators,
}

impl<'a> MessageService<'a> {
    pub fn new(db: &'a DatabaseConnection, collaborators: &'a Collaborators) -> Self {
        Self { db, collaborators }
    }

    /// Stores a message from the public contact form.
    pub async fn create(&self, mut input: Normalized) -> Result<Message, AppError> {
        let message = MessageRepository::new(self.db)
            .create(CreateMessageParams {
                name: input.take_string("name").unwrap_or_default(),
                subject: input.take_string("subject").unwrap_or_default(),
                email: input.take_string("email").unwrap_or_default(),
                message: input.take_string("message").unwrap_or_default(),
            })
            .await?;

        tracing::info!("Received contact message {}", message.id);

        Ok(message)
    }

    pub async fn list(
        &self,
        filter: MessageFilter,
        page: Page,
    ) -> Result<(Vec<Message>, u64), AppError> {
        Ok(MessageRepository::new(self.db).find(filter, page).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Message, AppError> {
        RecordLoader::new(&MessageRepository::new(self.db)).load(id).await
    }

    /// Applies validated `message_update` input.
    ///
    /// A `reply` is emailed to the sender and appended to the thread only once the
    /// mail is accepted.
    ///
    /// # Returns
    /// - `Ok(Message)` - The message as stored after the update
    /// - `Err(AppError::NotFound)` - No such message
    /// - `Err(AppError::MailErr)` - Mail delivery failed; the message is unchanged
    pub async fn update(&self, id: &str, input: Normalized) -> Result<Message, AppError> {
        let repo = MessageRepository::new(self.db);
        UpdatePipeline::new(&repo, self.collaborators.dispatcher())
            .run(id, input.into_patch())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Message, AppError> {
        let repo = MessageRepository::new(self.db);
        let message = RecordLoader::new(&repo).load(id).await?;

        repo.delete(message.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))
    }
}
