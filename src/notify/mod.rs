//! Sign-up summary notifications.
//!
//! Two entry points share one per-recipient delivery step:
//!
//! - [`SummaryNotifier::send_support_summary`] mails the brand's admin
//!   address and never reports a delivery failure to the caller.
//! - [`SummaryNotifier::send_customer_summaries`] mails the technical and
//!   billing contacts (deduplicated) and partitions them into success and
//!   failure sets.
//!
//! Recoverable failures (rendering, transport) are isolated per recipient.
//! A [`FatalError`] is never absorbed by that isolation and always
//! propagates out of both entry points.

mod attributes;

pub use attributes::RequestAttributes;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::json;

use crate::i18n::{Locale, MessageSource};
use crate::mail::{MailError, MailTransport, OutboundEmail};
use crate::models::{SignupSummary, SiteSettings};
use crate::render::{CountryDirectory, RenderError, SummaryRenderer};
use crate::resources::ResourceLoader;

/// Attribute key for addresses that were mailed successfully
pub const SUCCESS_ADDRESSES: &str = "successAddresses";
/// Attribute key for addresses that could not be mailed
pub const FAILURE_ADDRESSES: &str = "failureAddresses";

/// Unrecoverable condition raised while mailing; must reach the caller
#[derive(Debug, thiserror::Error)]
#[error("aborted while mailing {recipient}: {source}")]
pub struct FatalError {
    pub recipient: String,
    #[source]
    pub source: MailError,
}

/// Why a single recipient could not be mailed
#[derive(Debug, thiserror::Error)]
pub enum DeliveryFailure {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Transport(#[from] MailError),
}

/// Outcome of one render-and-send attempt
#[derive(Debug)]
pub enum DeliveryResult {
    Delivered,
    Failed(DeliveryFailure),
}

/// Per-recipient results of [`SummaryNotifier::send_customer_summaries`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub success_addresses: HashSet<String>,
    pub failure_addresses: HashSet<String>,
    /// Failure cause per address in `failure_addresses`
    pub failure_causes: HashMap<String, String>,
}

impl DeliveryReport {
    fn record(&mut self, address: String, result: DeliveryResult) {
        match result {
            DeliveryResult::Delivered => {
                self.success_addresses.insert(address);
            }
            DeliveryResult::Failed(cause) => {
                self.failure_causes.insert(address.clone(), cause.to_string());
                self.failure_addresses.insert(address);
            }
        }
    }
}

/// Renders and mails sign-up summaries
#[derive(Clone)]
pub struct SummaryNotifier {
    site: SiteSettings,
    messages: Arc<dyn MessageSource>,
    countries: Arc<dyn CountryDirectory>,
    resources: Arc<dyn ResourceLoader>,
    transport: Arc<dyn MailTransport>,
}

impl SummaryNotifier {
    pub fn new(
        site: SiteSettings,
        messages: Arc<dyn MessageSource>,
        countries: Arc<dyn CountryDirectory>,
        resources: Arc<dyn ResourceLoader>,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            site,
            messages,
            countries,
            resources,
            transport,
        }
    }

    /// Mail the summary to the brand's admin address.
    ///
    /// Delivery failures are logged and swallowed; only a [`FatalError`]
    /// is returned.
    pub async fn send_support_summary(
        &self,
        summary: &SignupSummary,
        locale: &Locale,
    ) -> Result<(), FatalError> {
        let recipient = self.site.brand.admin_address.as_str();

        match self.deliver(summary, locale, recipient).await? {
            DeliveryResult::Delivered => {
                tracing::info!(
                    tracking_key = %summary.tracking_key,
                    recipient,
                    "Sign up summary sent to support"
                );
            }
            DeliveryResult::Failed(cause) => {
                tracing::error!(
                    tracking_key = %summary.tracking_key,
                    recipient,
                    error = %cause,
                    "Unable to send sign up details to support admin address"
                );
            }
        }

        Ok(())
    }

    /// Mail the summary to every customer contact and publish the
    /// success/failure sets into `attributes`.
    ///
    /// Every recipient ends up in exactly one of the two sets. On a
    /// [`FatalError`] the remaining recipients are not attempted and
    /// `attributes` is left untouched.
    pub async fn send_customer_summaries(
        &self,
        summary: &SignupSummary,
        locale: &Locale,
        attributes: &mut RequestAttributes,
    ) -> Result<DeliveryReport, FatalError> {
        let mut report = DeliveryReport::default();

        for address in customer_recipients(summary) {
            let result = self.deliver(summary, locale, &address).await?;
            match &result {
                DeliveryResult::Delivered => {
                    tracing::info!(
                        tracking_key = %summary.tracking_key,
                        recipient = %address,
                        "Sign up summary sent"
                    );
                }
                DeliveryResult::Failed(cause) => {
                    tracing::error!(
                        tracking_key = %summary.tracking_key,
                        recipient = %address,
                        error = %cause,
                        "Unable to send sign up details"
                    );
                }
            }
            report.record(address, result);
        }

        attributes.set(SUCCESS_ADDRESSES, json!(report.success_addresses));
        attributes.set(FAILURE_ADDRESSES, json!(report.failure_addresses));

        Ok(report)
    }

    /// Render the summary for one recipient and hand it to the transport
    async fn deliver(
        &self,
        summary: &SignupSummary,
        locale: &Locale,
        recipient: &str,
    ) -> Result<DeliveryResult, FatalError> {
        if recipient.trim().is_empty() {
            return Ok(DeliveryResult::Failed(
                MailError::InvalidAddress(recipient.to_string()).into(),
            ));
        }

        let rendered = {
            let renderer = SummaryRenderer {
                messages: self.messages.as_ref(),
                countries: self.countries.as_ref(),
                resources: self.resources.as_ref(),
            };
            match renderer.render(summary, locale) {
                Ok(rendered) => rendered,
                Err(e) => return Ok(DeliveryResult::Failed(e.into())),
            }
        };

        let brand = &self.site.brand;
        let email = OutboundEmail {
            smtp_host: brand.signup_mail_host.clone(),
            media_type: rendered.media_type.to_string(),
            charset: rendered.charset.to_string(),
            from_address: brand.signup_from_address.clone(),
            from_display: brand.signup_from_display.clone(),
            to: vec![recipient.to_string()],
            subject: rendered.subject,
            body: rendered.body,
        };

        match self.transport.send(&email).await {
            Ok(()) => Ok(DeliveryResult::Delivered),
            Err(e) if e.is_fatal() => Err(FatalError {
                recipient: recipient.to_string(),
                source: e,
            }),
            Err(e) => Ok(DeliveryResult::Failed(e.into())),
        }
    }
}

impl fmt::Debug for SummaryNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryNotifier")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

/// Technical contact and billing addresses, trimmed and deduplicated.
///
/// Blank addresses stay in the set so they are reported as failures.
pub fn customer_recipients(summary: &SignupSummary) -> HashSet<String> {
    [summary.technical.email.as_str(), summary.billing.email.as_str()]
        .into_iter()
        .map(|addr| addr.trim().to_string())
        .collect()
}
