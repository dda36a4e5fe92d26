//! Outbound notifications: the `Mailer` trait and its SMTP / log backends.

pub mod log;
pub mod smtp;

use async_trait::async_trait;

use crate::error::NotifyError;

pub use log::LogMailer;
pub use smtp::SmtpMailer;

/// A rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    /// Plain-text alternative.
    pub text: String,
    /// HTML alternative.
    pub html: String,
}

/// Anything that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Make one delivery attempt.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;
}
