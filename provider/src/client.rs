//! HTTP client for the KYC provider's check resources.

use async_trait::async_trait;
use std::time::Duration;

use kyc_types::Verification;

use crate::{KycClient, KycError};

/// Provider API root used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.onfido.com";

/// Default timeout for decision requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the resource URL of a check.
pub fn check_href(api_base: &str, applicant_id: &str, check_id: &str) -> String {
    format!(
        "{}/v2/applicants/{}/checks/{}",
        api_base.trim_end_matches('/'),
        applicant_id,
        check_id
    )
}

/// Fetches check decisions with `GET {href}`.
pub struct HttpKycClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    api_token: Option<String>,
}

impl HttpKycClient {
    /// Create a client with default timeouts and no credentials.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            api_token: None,
        }
    }

    /// Authenticate every request with the provider API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

impl Default for HttpKycClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KycClient for HttpKycClient {
    async fn verify(&self, href: &str) -> Result<Verification, KycError> {
        let mut request = self.http_client.get(href);
        if let Some(token) = &self.api_token {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Token token={token}"),
            );
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(KycError::HttpStatus {
                status: response.status().as_u16(),
                href: href.to_string(),
            });
        }

        let body = response.text().await?;
        let verification = parse_verification(&body)?;
        tracing::debug!(
            href,
            address = %verification.address,
            pending = verification.pending,
            "fetched verification"
        );
        Ok(verification)
    }
}

/// Decode a decision payload.
pub(crate) fn parse_verification(body: &str) -> Result<Verification, KycError> {
    serde_json::from_str(body)
        .map_err(|e| KycError::InvalidResponse(format!("failed to parse verification: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_types::DocumentHash;

    #[test]
    fn test_check_href() {
        assert_eq!(
            check_href("https://api.onfido.com", "app-1", "chk-2"),
            "https://api.onfido.com/v2/applicants/app-1/checks/chk-2"
        );
        assert_eq!(
            check_href("http://localhost:9000/", "a", "c"),
            "http://localhost:9000/v2/applicants/a/checks/c"
        );
    }

    #[test]
    fn test_parse_terminal_verification() {
        let body = format!(
            r#"{{"address": "0x{}", "pending": false, "valid": true, "documentHash": "abc"}}"#,
            "0f".repeat(20)
        );
        let v = parse_verification(&body).unwrap();
        assert!(!v.pending);
        assert!(v.valid);
        assert_eq!(v.document_hash, Some(DocumentHash::new("abc")));
        assert!(v.reason.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_address() {
        let err = parse_verification(r#"{"pending": true}"#).unwrap_err();
        assert!(matches!(err, KycError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let err = parse_verification(r#"{"address": "0x12", "pending": false}"#).unwrap_err();
        assert!(matches!(err, KycError::InvalidResponse(_)));
    }

    #[test]
    fn test_client_creation() {
        let client = HttpKycClient::new().with_api_token("secret");
        assert_eq!(client.api_token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        let client = HttpKycClient::with_timeout(Duration::from_millis(500));
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let result = client
            .verify("http://127.0.0.1:9/v2/applicants/a/checks/c")
            .await;
        assert!(result.is_err());
    }
}
