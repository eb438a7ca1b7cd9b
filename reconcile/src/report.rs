//! Per-identity outcomes and the run summary.

use std::fmt;
use std::time::Duration;

use kyc_types::TxHash;
use kyc_utils::format_duration;

/// What happened when a verification href was queued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushResult {
    pub href: String,
    /// Pending transaction that had no receipt and was forgotten before pushing.
    pub dropped_transaction: Option<TxHash>,
}

/// Result of evaluating one identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No current check, or its status is not `pending`.
    NotAwaitingDecision,
    /// No applicant is linked to the current check.
    MissingApplicant,
    /// The provider has not reached a decision yet.
    VerificationPending,
    /// The decision carries no document hash, so it cannot be reconciled.
    MissingDocumentHash,
    /// Used-document rejection backed by another claimant; left alone.
    UsedDocumentConfirmed,
    /// Used-document rejection with no other claimant: the flag was cleared
    /// and the verification re-queued.
    DocumentReleased(PushResult),
    /// Terminal decision re-queued for certification.
    Pushed(PushResult),
}

impl Outcome {
    pub fn push(&self) -> Option<&PushResult> {
        match self {
            Outcome::DocumentReleased(push) | Outcome::Pushed(push) => Some(push),
            _ => None,
        }
    }
}

/// Tally of one reconciliation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Identities seen by the index pass.
    pub identities: u64,
    /// Distinct document hashes in the index.
    pub documents: u64,
    pub evaluated: u64,
    pub not_awaiting_decision: u64,
    pub missing_applicant: u64,
    pub verification_pending: u64,
    pub missing_document_hash: u64,
    pub used_document_confirmed: u64,
    pub documents_released: u64,
    /// Every push, including those following a document release.
    pub pushed: u64,
    pub dropped_transactions: u64,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn record(&mut self, outcome: &Outcome) {
        self.evaluated += 1;
        match outcome {
            Outcome::NotAwaitingDecision => self.not_awaiting_decision += 1,
            Outcome::MissingApplicant => self.missing_applicant += 1,
            Outcome::VerificationPending => self.verification_pending += 1,
            Outcome::MissingDocumentHash => self.missing_document_hash += 1,
            Outcome::UsedDocumentConfirmed => self.used_document_confirmed += 1,
            Outcome::DocumentReleased(_) => self.documents_released += 1,
            Outcome::Pushed(_) => {}
        }
        if let Some(push) = outcome.push() {
            self.pushed += 1;
            if push.dropped_transaction.is_some() {
                self.dropped_transactions += 1;
            }
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} identities, {} evaluated, {} pushed ({} documents released, {} dropped transactions), \
             {} pending at provider, {} without document hash, {} used documents confirmed, in {}",
            self.identities,
            self.evaluated,
            self.pushed,
            self.documents_released,
            self.dropped_transactions,
            self.verification_pending,
            self.missing_document_hash,
            self.used_document_confirmed,
            format_duration(self.elapsed.as_secs()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(dropped: Option<TxHash>) -> PushResult {
        PushResult {
            href: "https://kyc/a".into(),
            dropped_transaction: dropped,
        }
    }

    #[test]
    fn test_record_counts_pushes_once() {
        let mut report = RunReport::default();
        report.record(&Outcome::Pushed(push(None)));
        report.record(&Outcome::DocumentReleased(push(Some(TxHash::new([1; 32])))));
        report.record(&Outcome::VerificationPending);
        report.record(&Outcome::UsedDocumentConfirmed);

        assert_eq!(report.evaluated, 4);
        assert_eq!(report.pushed, 2);
        assert_eq!(report.documents_released, 1);
        assert_eq!(report.dropped_transactions, 1);
        assert_eq!(report.verification_pending, 1);
        assert_eq!(report.used_document_confirmed, 1);
    }

    #[test]
    fn test_outcome_push_accessor() {
        assert!(Outcome::MissingApplicant.push().is_none());
        assert_eq!(
            Outcome::Pushed(push(None)).push().map(|p| p.href.as_str()),
            Some("https://kyc/a")
        );
    }

    #[test]
    fn test_summary_line() {
        let report = RunReport {
            identities: 3,
            evaluated: 3,
            pushed: 1,
            ..Default::default()
        };
        let line = report.to_string();
        assert!(line.starts_with("3 identities, 3 evaluated, 1 pushed"));
        assert!(line.ends_with("in 0s"));
    }
}
