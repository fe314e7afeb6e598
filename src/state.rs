use std::sync::Arc;

use crate::config::Config;
use crate::i18n::{Locale, MessageCatalog};
use crate::mail::{Mailer, ShutdownFlag};
use crate::models::SiteSettings;
use crate::notify::SummaryNotifier;
use crate::render::StaticCountries;
use crate::resources::FsResources;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<SummaryNotifier>,
    pub mail_backend: &'static str,
}

impl AppState {
    pub fn new(config: Config, notifier: SummaryNotifier, mail_backend: &'static str) -> Self {
        Self {
            config: Arc::new(config),
            notifier: Arc::new(notifier),
            mail_backend,
        }
    }

    /// Locale used when the request carries no usable `Accept-Language`
    pub fn default_locale(&self) -> Locale {
        Locale::new(self.config.default_locale.clone())
    }

    /// Wire the production collaborators from configuration
    pub fn from_config(config: Config, shutdown: ShutdownFlag) -> crate::Result<Self> {
        let default_locale = Locale::new(config.default_locale.clone());
        let messages = match &config.messages_file {
            Some(path) => MessageCatalog::load(default_locale, path)?,
            None => MessageCatalog::with_defaults(default_locale),
        };

        let mailer = Mailer::from_config(&config, shutdown)?;
        let backend = mailer.backend_name();

        let notifier = SummaryNotifier::new(
            SiteSettings::from_config(&config),
            Arc::new(messages),
            Arc::new(StaticCountries::new()),
            Arc::new(FsResources::new(config.resources_dir.clone())),
            Arc::new(mailer),
        );

        Ok(Self::new(config, notifier, backend))
    }
}
