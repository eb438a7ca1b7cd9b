//! KYC provider access.
//!
//! A check is identified by its provider resource URL ("href"):
//! `{api_base}/v2/applicants/{applicant_id}/checks/{check_id}`. Fetching the
//! href returns the provider's decision for that check, which may still be
//! pending.

pub mod client;
pub mod error;

pub use client::{check_href, HttpKycClient, DEFAULT_API_BASE};
pub use error::KycError;

use async_trait::async_trait;
use kyc_types::Verification;

/// Source of KYC verification decisions.
#[async_trait]
pub trait KycClient: Send + Sync {
    /// Fetch the current decision for the check at `href`.
    ///
    /// A result with `pending == true` is not an error: the provider has
    /// simply not finished.
    async fn verify(&self, href: &str) -> Result<Verification, KycError>;
}
