//! KYC applicants and checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DocumentHash;

/// Lifecycle state of a check as recorded alongside the identity.
///
/// `Pending` means the identity is awaiting a verification decision; it is
/// unrelated to [`crate::Verification::pending`], which reports whether the
/// provider itself has finished processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Complete,
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single verification attempt recorded for an identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    /// Provider-assigned check identifier.
    pub id: String,
    pub status: CheckStatus,
    /// Fingerprint of the document submitted with this check, once known.
    #[serde(default)]
    pub document_hash: Option<DocumentHash>,
}

impl Check {
    pub fn new(id: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            id: id.into(),
            status,
            document_hash: None,
        }
    }

    pub fn with_document(mut self, hash: impl Into<DocumentHash>) -> Self {
        self.document_hash = Some(hash.into());
        self
    }
}

/// A provider applicant record. Each applicant is tied to at most one check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// Provider-assigned applicant identifier.
    pub id: String,
    #[serde(default)]
    pub check_id: Option<String>,
}

impl Applicant {
    pub fn new(id: impl Into<String>, check_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            check_id: Some(check_id.into()),
        }
    }
}
