use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub brand_admin_address: String,
    pub signup_from_address: String,
    pub signup_from_display: String,
    pub signup_mail_host: String,
    pub mail_backend: MailBackendKind,
    pub smtp_port: u16,
    pub smtp_tls: SmtpTls,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub resend_api_key: Option<String>,
    pub resources_dir: PathBuf,
    pub messages_file: Option<PathBuf>,
    pub default_locale: String,
}

/// Which mail backend delivers summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackendKind {
    Smtp,
    Resend,
    Log,
}

impl MailBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailBackendKind::Smtp => "smtp",
            MailBackendKind::Resend => "resend",
            MailBackendKind::Log => "log",
        }
    }
}

impl FromStr for MailBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(MailBackendKind::Smtp),
            "resend" => Ok(MailBackendKind::Resend),
            "log" => Ok(MailBackendKind::Log),
            other => Err(ConfigError::InvalidMailBackend(other.to_string())),
        }
    }
}

/// SMTP connection security
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    None,
    StartTls,
    Tls,
}

impl FromStr for SmtpTls {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SmtpTls::None),
            "starttls" => Ok(SmtpTls::StartTls),
            "tls" => Ok(SmtpTls::Tls),
            other => Err(ConfigError::InvalidSmtpTls(other.to_string())),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mail_backend: MailBackendKind = env::var("MAIL_BACKEND")
            .unwrap_or_else(|_| "smtp".to_string())
            .parse()?;

        let resend_api_key = env::var("RESEND_API_KEY").ok();
        if mail_backend == MailBackendKind::Resend && resend_api_key.is_none() {
            return Err(ConfigError::MissingResendApiKey);
        }

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            brand_admin_address: env::var("BRAND_ADMIN_ADDRESS")
                .map_err(|_| ConfigError::MissingVar("BRAND_ADMIN_ADDRESS"))?,
            signup_from_address: env::var("SIGNUP_FROM_ADDRESS")
                .map_err(|_| ConfigError::MissingVar("SIGNUP_FROM_ADDRESS"))?,
            signup_from_display: env::var("SIGNUP_FROM_DISPLAY")
                .unwrap_or_else(|_| "Sign Up".to_string()),
            signup_mail_host: env::var("SIGNUP_MAIL_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            mail_backend,
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "none".to_string())
                .parse()?,
            smtp_username: env::var("SMTP_USERNAME").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            resend_api_key,
            resources_dir: env::var("RESOURCES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./resources")),
            messages_file: env::var("MESSAGES_FILE").ok().map(PathBuf::from),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port")]
    InvalidPort,
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("RESEND_API_KEY is required when MAIL_BACKEND=resend")]
    MissingResendApiKey,
    #[error("Unknown mail backend: {0}")]
    InvalidMailBackend(String),
    #[error("Unknown SMTP_TLS mode: {0}")]
    InvalidSmtpTls(String),
}
