use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, OutboundEmail};
use crate::config::{Config, SmtpTls};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP delivery through lettre.
///
/// The relay host comes from each message, so a transport is built per
/// send rather than pooled.
#[derive(Clone)]
pub struct SmtpMailer {
    port: u16,
    tls: SmtpTls,
    credentials: Option<Credentials>,
}

impl SmtpMailer {
    pub fn new(port: u16, tls: SmtpTls, credentials: Option<Credentials>) -> Self {
        Self {
            port,
            tls,
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let credentials = match (&config.smtp_username, &config.smtp_password) {
            (Some(user), Some(pass)) => Some(Credentials::new(user.clone(), pass.clone())),
            _ => None,
        };

        Self::new(config.smtp_port, config.smtp_tls, credentials)
    }

    fn transport(&self, host: &str) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut builder = match self.tls {
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
        };

        builder = builder.port(self.port).timeout(Some(SMTP_TIMEOUT));

        if let Some(credentials) = &self.credentials {
            builder = builder.credentials(credentials.clone());
        }

        Ok(builder.build())
    }

    fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
        let from_address: Address = email
            .from_address
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.from_address.clone()))?;
        let display = Some(email.from_display.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let mut builder = Message::builder()
            .from(Mailbox::new(display, from_address))
            .subject(email.subject.as_str());

        for to in &email.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.clone()))?;
            builder = builder.to(mailbox);
        }

        let content_type =
            ContentType::parse(&email.content_type()).map_err(|e| MailError::Build(e.to_string()))?;

        builder
            .header(content_type)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = Self::build_message(email)?;
        let transport = self.transport(&email.smtp_host)?;

        transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        tracing::debug!(host = %email.smtp_host, to = ?email.to, "SMTP message accepted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutboundEmail {
        OutboundEmail {
            smtp_host: "localhost".to_string(),
            media_type: "text/html".to_string(),
            charset: "ISO-8859-1".to_string(),
            from_address: "signup@example.com".to_string(),
            from_display: "Example Sign Up".to_string(),
            to: vec![to.to_string()],
            subject: "Sign up request #7".to_string(),
            body: "<html>\r\n</html>\r\n".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let message = SmtpMailer::build_message(&email("user@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        let lower = raw.to_ascii_lowercase();

        assert!(raw.contains("Example Sign Up"));
        assert!(raw.contains("<signup@example.com>"));
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("Subject: Sign up request #7"));
        assert!(lower.contains("content-type: text/html; charset=iso-8859-1"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let err = SmtpMailer::build_message(&email("not an address")).unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_send_to_unreachable_host_is_recoverable() {
        let mailer = SmtpMailer::new(1, SmtpTls::None, None);
        let mut e = email("user@example.com");
        e.smtp_host = "127.0.0.1".to_string();

        let err = mailer.send(&e).await.unwrap_err();
        assert!(matches!(err, MailError::Smtp(_)));
        assert!(!err.is_fatal());
    }
}
