//! Nullable KYC client: scripted decisions per href.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use kyc_provider::{KycClient, KycError};
use kyc_types::Verification;

/// A KYC client answering from a per-href script.
///
/// Unscripted hrefs fail with HTTP 404, like an unknown check would.
pub struct NullKycClient {
    decisions: Mutex<HashMap<String, Result<Verification, String>>>,
    requests: Mutex<Vec<String>>,
}

impl NullKycClient {
    pub fn new() -> Self {
        Self {
            decisions: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer `href` with `verification`.
    pub fn respond(&self, href: &str, verification: Verification) {
        self.decisions
            .lock()
            .unwrap()
            .insert(href.to_string(), Ok(verification));
    }

    /// Fail requests for `href` as if the provider were unreachable.
    pub fn fail(&self, href: &str, message: &str) {
        self.decisions
            .lock()
            .unwrap()
            .insert(href.to_string(), Err(message.to_string()));
    }

    /// Every href requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for NullKycClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KycClient for NullKycClient {
    async fn verify(&self, href: &str) -> Result<Verification, KycError> {
        self.requests.lock().unwrap().push(href.to_string());
        match self.decisions.lock().unwrap().get(href) {
            Some(Ok(verification)) => Ok(verification.clone()),
            Some(Err(message)) => Err(KycError::Unreachable(message.clone())),
            None => Err(KycError::HttpStatus {
                status: 404,
                href: href.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_types::Address;

    #[tokio::test]
    async fn test_scripted_and_unknown_hrefs() {
        let client = NullKycClient::new();
        let verification = Verification {
            address: Address::new([1; 20]),
            pending: true,
            valid: false,
            document_hash: None,
            reason: None,
        };
        client.respond("https://kyc/a", verification.clone());

        assert_eq!(client.verify("https://kyc/a").await.unwrap(), verification);
        assert!(matches!(
            client.verify("https://kyc/b").await,
            Err(KycError::HttpStatus { status: 404, .. })
        ));
        assert_eq!(client.requests(), vec!["https://kyc/a", "https://kyc/b"]);
    }
}
