use super::{MailError, OutboundEmail};

/// Development backend: logs the envelope instead of delivering it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl LogMailer {
    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            host = %email.smtp_host,
            from = %email.from_mailbox(),
            to = ?email.to,
            subject = %email.subject,
            bytes = email.body.len(),
            "Mail (log backend)"
        );
        tracing::debug!(body = %email.body, "Mail body");
        Ok(())
    }
}
