//! KYC verification results.

use serde::{Deserialize, Serialize};

use crate::{Address, DocumentHash};

/// Reason reported when the provider believes the document already backs
/// another identity.
pub const USED_DOCUMENT_REASON: &str = "used-document";

/// Decision payload returned by the KYC provider for one check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Address the check was opened for.
    pub address: Address,
    /// The provider has not finished processing the check.
    pub pending: bool,
    /// Whether the provider accepted the identity.
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub document_hash: Option<DocumentHash>,
    /// Machine-readable rejection reason, e.g. [`USED_DOCUMENT_REASON`].
    #[serde(default)]
    pub reason: Option<String>,
}

impl Verification {
    pub fn is_used_document(&self) -> bool {
        self.reason.as_deref() == Some(USED_DOCUMENT_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_document_payload() {
        let json = format!(
            r#"{{"address": "0x{}", "pending": false, "documentHash": "d", "reason": "used-document"}}"#,
            "22".repeat(20)
        );
        let v: Verification = serde_json::from_str(&json).unwrap();
        assert!(v.is_used_document());
        assert!(!v.pending);
        assert!(!v.valid);
        assert_eq!(v.document_hash, Some(DocumentHash::new("d")));
    }

    #[test]
    fn test_pending_payload_has_no_reason() {
        let json = format!(r#"{{"address": "0x{}", "pending": true}}"#, "22".repeat(20));
        let v: Verification = serde_json::from_str(&json).unwrap();
        assert!(v.pending);
        assert!(!v.is_used_document());
        assert!(v.document_hash.is_none());
    }
}
