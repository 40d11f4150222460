//! Notification sender — welcome emails for new contacts.
//!
//! Dispatch goes through the [`Mailer`] trait so the HTTP layer never
//! depends on a concrete transport. Two implementations:
//! - [`SmtpMailer`] — real delivery via lettre's async SMTP transport
//! - [`LogMailer`] — no SMTP configured; logs the message and succeeds
//!
//! The create handler persists the contact first and dispatches the
//! notification afterwards on a background task. A delivery failure is
//! logged, never reported as a request failure — persistence and
//! notification are two independent effects.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpConfig;
use crate::store::Contact;

/// Subject line of the welcome mail.
const WELCOME_SUBJECT: &str = "Welcome to Contactos!";

/// An ephemeral outbound message. Constructed per contact-creation event,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
}

/// Build the welcome notification for a freshly created contact.
///
/// Fixed subject, HTML body personalized by name, addressed to the
/// contact's own email.
pub fn welcome(contact: &Contact) -> Notification {
    Notification {
        to: contact.email.clone(),
        subject: WELCOME_SUBJECT.to_owned(),
        html_body: format!(
            "<html><body><p>Hi {name},<br/><br/>\
             Your contact record was just added to our address book. \
             We will use this address to keep you in the loop.<br/><br/>\
             If this wasn't you, reply to this mail and we will remove \
             the record.<br/><br/>\
             — The Contactos team</p></body></html>",
            name = contact.name
        ),
    }
}

/// Errors from notification dispatch.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A recipient or sender address failed to parse.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be assembled.
    #[error("failed to build mail: {0}")]
    Message(#[from] lettre::error::Error),

    /// The SMTP transport rejected or failed the delivery.
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The configured password environment variable is not set.
    #[error("smtp password env var {var} is not set")]
    MissingCredential {
        /// Name of the missing variable.
        var: String,
    },
}

/// Abstraction over outbound mail dispatch.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or the transport
    /// fails. Callers decide whether that failure is fatal.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Real SMTP delivery via lettre.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a mailer from config, resolving the password from the
    /// environment variable named in `config.password_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the password variable is unset, the sender
    /// address does not parse, or the relay hostname is invalid.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let password =
            std::env::var(&config.password_env).map_err(|_| NotifyError::MissingCredential {
                var: config.password_env.clone(),
            })?;

        let from: Mailbox = config.from.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let to: Mailbox = notification.to.parse()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&notification.subject)
            .header(ContentType::TEXT_HTML)
            .body(notification.html_body.clone())?;

        self.transport.send(message).await?;
        info!(to = %notification.to, "welcome mail delivered");
        Ok(())
    }
}

/// Fallback mailer used when no `[smtp]` section is configured.
///
/// Logs the would-be delivery and reports success.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "mail delivery disabled; welcome mail logged only"
        );
        Ok(())
    }
}
