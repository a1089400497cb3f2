//! HTTP submission gateway - posts assembled cases to the practice backend.
//!
//! Single attempt per submission: the wizard never retries automatically,
//! since a rejected payload may need human correction first. Timeout policy
//! lives in configuration, not in the wizard core.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::GatewayConfig;
use crate::domain::foundation::WizardError;
use crate::domain::intake::CasePayload;
use crate::ports::SubmissionGateway;

/// Response shape of `POST /api/cases`.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    case_id: Option<String>,
}

/// Gateway adapter talking to the practice backend over HTTP.
pub struct HttpSubmissionGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpSubmissionGateway {
    /// Builds the adapter with the configured timeout.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the HTTP client cannot be constructed
    pub fn new(config: GatewayConfig) -> Result<Self, WizardError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WizardError::infrastructure(format!("http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn cases_url(&self) -> String {
        format!("{}/api/cases", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(&self, payload: &CasePayload) -> Result<(), WizardError> {
        let mut request = self.client.post(self.cases_url()).json(payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| WizardError::submission_failed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(WizardError::submission_failed(format!(
                "backend returned {}: {}",
                status, detail
            )));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| WizardError::submission_failed(format!("invalid backend response: {}", e)))?;

        if body.success {
            tracing::info!(
                session_id = %payload.session_id,
                case_id = ?body.case_id,
                "case accepted by backend"
            );
            Ok(())
        } else {
            Err(WizardError::submission_failed(
                body.error
                    .unwrap_or_else(|| "backend rejected the case".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_url_strips_trailing_slash() {
        let gateway = HttpSubmissionGateway::new(GatewayConfig {
            base_url: "https://backend.example/".to_string(),
            ..GatewayConfig::default()
        })
        .unwrap();
        assert_eq!(gateway.cases_url(), "https://backend.example/api/cases");
    }

    #[test]
    fn response_parses_failure_shape() {
        let body: SubmitResponse =
            serde_json::from_str(r#"{"success": false, "error": "duplicate patient"}"#).unwrap();
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("duplicate patient"));
        assert!(body.case_id.is_none());
    }

    #[test]
    fn response_parses_success_shape() {
        let body: SubmitResponse =
            serde_json::from_str(r#"{"success": true, "case_id": "C-1042"}"#).unwrap();
        assert!(body.success);
        assert_eq!(body.case_id.as_deref(), Some("C-1042"));
    }
}
