pub mod log;
pub mod resend;
pub mod smtp;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, MailBackendKind};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Mail API error: {0}")]
    Api(String),

    /// The process is tearing down; callers must not treat this as a
    /// per-recipient failure.
    #[error("mail delivery stopped: server is shutting down")]
    ShuttingDown,
}

impl MailError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, MailError::ShuttingDown)
    }
}

/// One outbound message, addressed and fully rendered
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Mail server to hand the message to
    pub smtp_host: String,
    /// MIME type of the body, without parameters
    pub media_type: String,
    pub charset: String,
    pub from_address: String,
    pub from_display: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl OutboundEmail {
    /// `Content-Type` header value, e.g. `text/html; charset=UTF-8`
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", self.media_type, self.charset)
    }

    /// `Display <address>`
    pub fn from_mailbox(&self) -> String {
        if self.from_display.trim().is_empty() {
            self.from_address.clone()
        } else {
            format!("{} <{}>", self.from_display, self.from_address)
        }
    }
}

/// Delivers a rendered message or reports why it could not
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Set once graceful shutdown starts; later sends fail fatally
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
enum Backend {
    Smtp(smtp::SmtpMailer),
    Resend(resend::ResendMailer),
    Log(log::LogMailer),
}

/// Mailer abstraction over the configured backend
#[derive(Clone)]
pub struct Mailer {
    inner: Backend,
    shutdown: ShutdownFlag,
}

impl Mailer {
    pub fn from_config(config: &Config, shutdown: ShutdownFlag) -> Result<Self, MailError> {
        let inner = match config.mail_backend {
            MailBackendKind::Smtp => Backend::Smtp(smtp::SmtpMailer::from_config(config)),
            MailBackendKind::Resend => Backend::Resend(resend::ResendMailer::from_config(config)?),
            MailBackendKind::Log => Backend::Log(log::LogMailer),
        };

        Ok(Self { inner, shutdown })
    }

    pub fn backend_name(&self) -> &'static str {
        match self.inner {
            Backend::Smtp(_) => "smtp",
            Backend::Resend(_) => "resend",
            Backend::Log(_) => "log",
        }
    }
}

#[async_trait]
impl MailTransport for Mailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.shutdown.is_triggered() {
            return Err(MailError::ShuttingDown);
        }

        match &self.inner {
            Backend::Smtp(m) => m.send(email).await,
            Backend::Resend(m) => m.send(email).await,
            Backend::Log(m) => m.send(email).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            smtp_host: "localhost".to_string(),
            media_type: "text/html".to_string(),
            charset: "UTF-8".to_string(),
            from_address: "signup@example.com".to_string(),
            from_display: "Example Sign Up".to_string(),
            to: vec!["user@example.com".to_string()],
            subject: "Sign up request #1".to_string(),
            body: "<html></html>\r\n".to_string(),
        }
    }

    #[test]
    fn test_from_mailbox() {
        let mut e = email();
        assert_eq!(e.from_mailbox(), "Example Sign Up <signup@example.com>");
        e.from_display = String::new();
        assert_eq!(e.from_mailbox(), "signup@example.com");
    }

    #[test]
    fn test_content_type_carries_charset() {
        let mut e = email();
        assert_eq!(e.content_type(), "text/html; charset=UTF-8");
        e.charset = "ISO-8859-1".to_string();
        assert_eq!(e.content_type(), "text/html; charset=ISO-8859-1");
    }

    #[test]
    fn test_only_shutdown_is_fatal() {
        assert!(MailError::ShuttingDown.is_fatal());
        assert!(!MailError::Smtp("connection refused".to_string()).is_fatal());
        assert!(!MailError::InvalidAddress("x".to_string()).is_fatal());
    }

    #[tokio::test]
    async fn test_mailer_refuses_after_shutdown() {
        let shutdown = ShutdownFlag::new();
        let mailer = Mailer {
            inner: Backend::Log(log::LogMailer),
            shutdown: shutdown.clone(),
        };

        assert!(mailer.send(&email()).await.is_ok());

        shutdown.trigger();
        let err = mailer.send(&email()).await.unwrap_err();
        assert!(err.is_fatal());
    }
}
