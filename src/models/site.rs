use crate::config::Config;

/// Brand-level mail identity
#[derive(Debug, Clone)]
pub struct Brand {
    /// Where the internal sign-up summary goes
    pub admin_address: String,
    pub signup_from_address: String,
    pub signup_from_display: String,
    /// Outbound server for the sign-up address's domain
    pub signup_mail_host: String,
}

/// Site-wide settings handed to the notifier
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub brand: Brand,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            brand: Brand {
                admin_address: config.brand_admin_address.clone(),
                signup_from_address: config.signup_from_address.clone(),
                signup_from_display: config.signup_from_display.clone(),
                signup_mail_host: config.signup_mail_host.clone(),
            },
        }
    }
}
