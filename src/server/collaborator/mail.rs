use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// An outgoing email, rendered and ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail delivery is not configured")]
    NotConfigured,

    #[error("Mail delivery failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Delivers mail through a JSON HTTP API authenticated with a bearer key.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(client: reqwest::Client, endpoint: Url, api_key: &str, from: &str) -> Self {
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        self.client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&OutgoingEmail {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
                text: &email.text,
            })
            .send()
            .await?
            .error_for_status()?;

        tracing::info!("Sent mail to {}", email.to);

        Ok(())
    }
}

/// Installed when no mail API is configured.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _email: &Email) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}
