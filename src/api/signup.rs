use axum::{
    extract::{Path, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::i18n::Locale;
use crate::models::{ConfirmationRequest, ConfirmationResponse};
use crate::notify::{RequestAttributes, FAILURE_ADDRESSES, SUCCESS_ADDRESSES};
use crate::state::AppState;

/// Sign-up wizard routes
pub fn signup_routes() -> Router<AppState> {
    Router::new().route("/{tracking_key}/confirmation", post(confirm_signup))
}

fn request_locale(headers: &HeaderMap, fallback: &Locale) -> Locale {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(Locale::from_accept_language)
        .unwrap_or_else(|| fallback.clone())
}

/// POST /api/v1/signup/:tracking_key/confirmation - Mail the sign-up summary
/// to support and to the customer contacts
async fn confirm_signup(
    State(state): State<AppState>,
    Path(tracking_key): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ConfirmationRequest>,
) -> Result<Json<ConfirmationResponse>> {
    let tracking_key = tracking_key.trim().to_string();
    if tracking_key.is_empty() {
        return Err(AppError::BadRequest("Tracking key is required".to_string()));
    }
    if request.status_key.trim().is_empty() {
        return Err(AppError::BadRequest("Status key is required".to_string()));
    }
    if request.package.name.trim().is_empty() {
        return Err(AppError::BadRequest("Package name is required".to_string()));
    }
    if request.technical.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Technical contact email is required".to_string(),
        ));
    }
    if request.billing.email.trim().is_empty() {
        return Err(AppError::BadRequest("Billing email is required".to_string()));
    }

    let locale = request_locale(&headers, &state.default_locale());
    let summary = request.into_summary(tracking_key.clone());

    state
        .notifier
        .send_support_summary(&summary, &locale)
        .await?;

    let mut attributes = RequestAttributes::new();
    let report = state
        .notifier
        .send_customer_summaries(&summary, &locale, &mut attributes)
        .await?;

    tracing::info!(
        tracking_key = %tracking_key,
        locale = %locale,
        delivered = report.success_addresses.len(),
        failed = report.failure_addresses.len(),
        "Sign up confirmation mailed"
    );

    Ok(Json(ConfirmationResponse {
        tracking_key,
        success_addresses: attributes.address_set(SUCCESS_ADDRESSES).unwrap_or_default(),
        failure_addresses: attributes.address_set(FAILURE_ADDRESSES).unwrap_or_default(),
        failures: report.failure_causes.into_iter().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::config::{Config, MailBackendKind, SmtpTls};
    use crate::i18n::MessageCatalog;
    use crate::mail::{MailError, MailTransport, OutboundEmail};
    use crate::models::{Brand, SiteSettings};
    use crate::notify::SummaryNotifier;
    use crate::render::StaticCountries;
    use crate::resources::FsResources;

    #[derive(Default)]
    struct RecordingTransport {
        fail_for: Option<&'static str>,
        fatal: bool,
        subjects: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: &OutboundEmail) -> std::result::Result<(), MailError> {
            if self.fatal {
                return Err(MailError::ShuttingDown);
            }
            self.subjects
                .lock()
                .unwrap()
                .push((email.to[0].clone(), email.subject.clone()));
            match self.fail_for {
                Some(addr) if email.to.iter().any(|t| t == addr) => {
                    Err(MailError::Smtp("550 mailbox unavailable".to_string()))
                }
                _ => Ok(()),
            }
        }
    }

    fn test_config() -> Config {
        Config {
            server_host: "localhost".to_string(),
            server_port: 8080,
            brand_admin_address: "support@example.com".to_string(),
            signup_from_address: "signup@example.com".to_string(),
            signup_from_display: "Example Sign Up".to_string(),
            signup_mail_host: "mail.example.com".to_string(),
            mail_backend: MailBackendKind::Log,
            smtp_port: 25,
            smtp_tls: SmtpTls::None,
            smtp_username: None,
            smtp_password: None,
            resend_api_key: None,
            resources_dir: PathBuf::from("./resources"),
            messages_file: None,
            default_locale: "en".to_string(),
        }
    }

    fn app(transport: Arc<RecordingTransport>) -> Router {
        let config = test_config();
        let mut catalog = MessageCatalog::with_defaults(Locale::new("en"));
        catalog
            .merge_json(r#"{"fr": {"serverConfirmationCompleted.email.subject": "Inscription n°{0}"}}"#)
            .unwrap();

        let notifier = SummaryNotifier::new(
            SiteSettings {
                brand: Brand {
                    admin_address: config.brand_admin_address.clone(),
                    signup_from_address: config.signup_from_address.clone(),
                    signup_from_display: config.signup_from_display.clone(),
                    signup_mail_host: config.signup_mail_host.clone(),
                },
            },
            Arc::new(catalog),
            Arc::new(StaticCountries::new()),
            Arc::new(FsResources::new(config.resources_dir.clone())),
            transport,
        );

        create_router(AppState::new(config, notifier, "test"))
    }

    fn body(technical: &str, billing: &str) -> serde_json::Value {
        json!({
            "status_key": "serverConfirmationCompleted.success",
            "package": {
                "name": "basic",
                "display": "Basic Hosting",
                "monthly_rate": "$19.95"
            },
            "organization": {
                "organization_name": "Acme",
                "phone": "555-0100",
                "address1": "1 Main St",
                "city": "Springfield",
                "country": "US"
            },
            "technical": {
                "contact_name": "Tess Tech",
                "work_phone": "555-0101",
                "email": technical,
                "address1": "1 Main St",
                "city": "Springfield",
                "country": "US"
            },
            "billing": {
                "contact": "Bill Payer",
                "email": billing,
                "phone": "555-0102",
                "cardholder_name": "Bill Payer",
                "card_number": "4111111111111111",
                "expiration_month": "01",
                "expiration_year": "2030",
                "street_address": "1 Main St",
                "city": "Springfield",
                "country_code": "US"
            }
        })
    }

    fn post(uri: &str, body: &serde_json::Value, language: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(language) = language {
            builder = builder.header(ACCEPT_LANGUAGE, language);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_confirmation_partitions_recipients() {
        let transport = Arc::new(RecordingTransport {
            fail_for: Some("billing@example.com"),
            ..Default::default()
        });

        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/signup/3001/confirmation",
                &body("tech@example.com", "billing@example.com"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["tracking_key"], "3001");
        assert_eq!(json["successAddresses"], json!(["tech@example.com"]));
        assert_eq!(json["failureAddresses"], json!(["billing@example.com"]));
        assert!(json["failures"]["billing@example.com"]
            .as_str()
            .unwrap()
            .contains("550"));

        // support + two customers
        assert_eq!(transport.subjects.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_confirmation_uses_accept_language() {
        let transport = Arc::new(RecordingTransport::default());

        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/signup/77/confirmation",
                &body("same@example.com", "same@example.com"),
                Some("fr-FR,fr;q=0.9"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let sent = transport.subjects.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, subject)| subject == "Inscription n°77"));
    }

    #[tokio::test]
    async fn test_confirmation_rejects_missing_status_key() {
        let transport = Arc::new(RecordingTransport::default());
        let mut request = body("tech@example.com", "billing@example.com");
        request["status_key"] = json!("  ");

        let response = app(transport.clone())
            .oneshot(post("/api/v1/signup/1/confirmation", &request, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transport.subjects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_rejects_blank_billing_email() {
        let transport = Arc::new(RecordingTransport::default());

        let response = app(transport.clone())
            .oneshot(post(
                "/api/v1/signup/2/confirmation",
                &body("tech@example.com", "   "),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["error"], "Billing email is required");
        assert!(transport.subjects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_fatal_is_unavailable() {
        let transport = Arc::new(RecordingTransport {
            fatal: true,
            ..Default::default()
        });

        let response = app(transport)
            .oneshot(post(
                "/api/v1/signup/9/confirmation",
                &body("tech@example.com", "billing@example.com"),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = read_json(response).await;
        assert_eq!(json["code"], 503);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(RecordingTransport::default()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["mail_backend"], "test");
    }
}
