use std::collections::HashMap;
use std::path::Path;

use super::{format_message, Locale, MessageSource};
use crate::error::{AppError, Result};

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("serverConfirmationCompleted.email.subject", "Sign up request #{0}"),
    (
        "serverConfirmationCompleted.success",
        "Your sign up request #{0} has been received and will be processed shortly.",
    ),
    (
        "serverConfirmationCompleted.pending",
        "Your sign up request #{0} has been received and is awaiting review.",
    ),
    (
        "serverConfirmationCompleted.belowIsSummary",
        "Below is a summary of your sign up request:",
    ),
    ("steps.selectPackage.label", "Package Selection"),
    ("steps.organizationInfo.label", "Organization Information"),
    ("steps.technicalInfo.label", "Technical Contact"),
    ("steps.billingInformation.label", "Billing Information"),
    ("package.name.prompt", "Package"),
    ("package.monthlyRate.prompt", "Monthly Rate"),
    ("package.setupFee.prompt", "Setup Fee"),
    ("organization.name.prompt", "Organization Name"),
    ("organization.phone.prompt", "Phone"),
    ("organization.fax.prompt", "Fax"),
    ("address.address1.prompt", "Address"),
    ("address.address2.prompt", "Address (line 2)"),
    ("address.city.prompt", "City"),
    ("address.state.prompt", "State/Province"),
    ("address.country.prompt", "Country"),
    ("address.zip.prompt", "Postal Code"),
    ("technical.contactName.prompt", "Contact Name"),
    ("technical.title.prompt", "Title"),
    ("technical.workPhone.prompt", "Work Phone"),
    ("technical.cellPhone.prompt", "Cell Phone"),
    ("technical.email.prompt", "Email"),
    ("billing.contact.prompt", "Billing Contact"),
    ("billing.email.prompt", "Billing Email"),
    ("billing.phone.prompt", "Billing Phone"),
    ("billing.cardholderName.prompt", "Cardholder Name"),
    ("billing.cardNumber.prompt", "Card Number"),
    ("billing.expirationDate.prompt", "Expiration Date"),
    ("billing.streetAddress.prompt", "Street Address"),
];

/// In-memory message catalog keyed by locale tag.
///
/// Lookup order: exact tag, language subtag, default locale. Unknown keys
/// render as `???key???` so a missing translation shows up in the mail
/// instead of failing the send.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: Locale,
    bundles: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Catalog with the built-in English messages registered for `default_locale`
    pub fn with_defaults(default_locale: Locale) -> Self {
        let defaults = DEFAULT_MESSAGES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut bundles = HashMap::new();
        bundles.insert(default_locale.tag().to_string(), defaults);

        Self {
            default_locale,
            bundles,
        }
    }

    /// Built-in defaults, overlaid with a JSON file shaped
    /// `{"<locale>": {"<key>": "<pattern>"}}`
    pub fn load(default_locale: Locale, path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::InternalError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let mut catalog = Self::with_defaults(default_locale);
        catalog.merge_json(&raw)?;
        Ok(catalog)
    }

    pub fn merge_json(&mut self, raw: &str) -> Result<()> {
        let parsed: HashMap<String, HashMap<String, String>> = serde_json::from_str(raw)?;
        for (locale, messages) in parsed {
            let tag = Locale::new(locale).tag().to_string();
            self.bundles.entry(tag).or_default().extend(messages);
        }
        Ok(())
    }

    fn lookup(&self, locale: &Locale, key: &str) -> Option<&str> {
        [locale.tag(), locale.language(), self.default_locale.tag()]
            .into_iter()
            .find_map(|tag| self.bundles.get(tag).and_then(|b| b.get(key)))
            .map(String::as_str)
    }
}

impl MessageSource for MessageCatalog {
    fn message(&self, locale: &Locale, key: &str, args: &[&str]) -> String {
        match self.lookup(locale, key) {
            Some(pattern) => format_message(pattern, args),
            None => {
                tracing::warn!(locale = %locale, key, "Missing message");
                format!("???{}???", key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_messages() {
        let catalog = MessageCatalog::with_defaults(Locale::new("en"));
        let subject = catalog.message(
            &Locale::new("en"),
            "serverConfirmationCompleted.email.subject",
            &["1234"],
        );
        assert_eq!(subject, "Sign up request #1234");
    }

    #[test]
    fn test_fallback_language_then_default() {
        let mut catalog = MessageCatalog::with_defaults(Locale::new("en"));
        catalog
            .merge_json(r#"{"fr": {"steps.selectPackage.label": "Choix du forfait"}}"#)
            .unwrap();

        let fr_ca = Locale::new("fr-CA");
        assert_eq!(
            catalog.message(&fr_ca, "steps.selectPackage.label", &[]),
            "Choix du forfait"
        );
        assert_eq!(
            catalog.message(&fr_ca, "steps.billingInformation.label", &[]),
            "Billing Information"
        );
    }

    #[test]
    fn test_missing_key() {
        let catalog = MessageCatalog::with_defaults(Locale::new("en"));
        assert_eq!(
            catalog.message(&Locale::new("en"), "no.such.key", &[]),
            "???no.such.key???"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(
            &path,
            r#"{"de_DE": {"serverConfirmationCompleted.email.subject": "Anmeldung #{0}"}}"#,
        )
        .unwrap();

        let catalog = MessageCatalog::load(Locale::new("en"), &path).unwrap();
        assert_eq!(
            catalog.message(
                &Locale::new("de-DE"),
                "serverConfirmationCompleted.email.subject",
                &["7"]
            ),
            "Anmeldung #7"
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        let mut catalog = MessageCatalog::with_defaults(Locale::new("en"));
        assert!(catalog.merge_json("not json").is_err());
    }
}
