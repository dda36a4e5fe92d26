//! Log-only mailer for local runs without SMTP.

use async_trait::async_trait;

use super::{Mailer, OutgoingEmail};
use crate::error::NotifyError;

/// Writes each email to the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            "Email logged (SMTP not configured)"
        );
        Ok(())
    }
}
