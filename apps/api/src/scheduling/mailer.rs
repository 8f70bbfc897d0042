//! Interview emails over SMTP (STARTTLS).
//!
//! SMTP settings come from `Config` at startup. Without credentials the app gets a
//! `DisabledMailer`, which logs and reports every send as failed.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP_USER or SMTP_PASS not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Sender address; defaults to the SMTP user.
    pub from: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    from_name: String,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password,
            ))
            .build();
        Ok(Self {
            transport,
            sender: settings.username,
            from_name: settings.from_name,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email, &self.sender, &self.from_name)?;
        match self.transport.send(message).await {
            Ok(_) => {
                info!("Email sent to {}", email.to);
                Ok(())
            }
            Err(e) => {
                error!("Email send to {} failed: {e}", email.to);
                Err(MailError::Smtp(e))
            }
        }
    }
}

pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        error!("SMTP_USER or SMTP_PASS not configured. Email to {} not sent.", email.to);
        Err(MailError::NotConfigured)
    }
}

/// Builds a plain-text message from `"<from_name> <sender>"` to the recipient.
pub fn build_message(
    email: &OutgoingEmail,
    default_sender: &str,
    from_name: &str,
) -> Result<Message, MailError> {
    let sender: Address = email.from.as_deref().unwrap_or(default_sender).parse()?;
    let recipient: Address = email.to.parse()?;
    Ok(Message::builder()
        .from(Mailbox::new(Some(from_name.to_string()), sender))
        .to(Mailbox::new(None, recipient))
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?)
}
