use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Package chosen in the first wizard step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSelection {
    pub name: String,
    pub display: String,
    pub monthly_rate: String,
    #[serde(default)]
    pub setup_fee: Option<String>,
}

/// Organization step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationForm {
    pub organization_name: String,
    pub phone: String,
    #[serde(default)]
    pub fax: Option<String>,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Technical contact step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalForm {
    pub contact_name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub work_phone: String,
    #[serde(default)]
    pub cell_phone: Option<String>,
    pub email: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Billing step. Only the masked card number ever leaves this struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingForm {
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub street_address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country_code: String,
}

impl BillingForm {
    /// Card number with everything but the last four digits hidden
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        if digits.len() <= 4 {
            return "*".repeat(digits.len());
        }

        let tail: String = digits[digits.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(digits.len() - 4), tail)
    }
}

/// Everything the summary mail needs about one sign-up
#[derive(Debug, Clone)]
pub struct SignupSummary {
    pub tracking_key: String,
    pub status_key: String,
    pub package: PackageSelection,
    pub organization: OrganizationForm,
    pub technical: TechnicalForm,
    pub billing: BillingForm,
}

/// Body of POST /api/v1/signup/{tracking_key}/confirmation
#[derive(Debug, Deserialize)]
pub struct ConfirmationRequest {
    pub status_key: String,
    pub package: PackageSelection,
    pub organization: OrganizationForm,
    pub technical: TechnicalForm,
    pub billing: BillingForm,
}

impl ConfirmationRequest {
    pub fn into_summary(self, tracking_key: String) -> SignupSummary {
        SignupSummary {
            tracking_key,
            status_key: self.status_key,
            package: self.package,
            organization: self.organization,
            technical: self.technical,
            billing: self.billing,
        }
    }
}

/// Response after the confirmation mails went out
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub tracking_key: String,
    #[serde(rename = "successAddresses")]
    pub success_addresses: BTreeSet<String>,
    #[serde(rename = "failureAddresses")]
    pub failure_addresses: BTreeSet<String>,
    #[serde(default)]
    pub failures: BTreeMap<String, String>,
}
