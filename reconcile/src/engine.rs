//! Two-phase reconciliation run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kyc_chain::ChainConnector;
use kyc_provider::{check_href, KycClient};
use kyc_store::IdentityStore;
use kyc_types::{CheckStatus, Identity, Verification};
use kyc_utils::Progress;

use crate::{DocumentMap, Outcome, PushResult, ReconcileError, RunReport};

/// Minimum time between two progress lines during the evaluation pass.
const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Drives verification results toward certification.
///
/// Identities are processed strictly one at a time and every provider or
/// node request is awaited before the next one is issued, so at most one
/// request is in flight against each external service.
pub struct ReconciliationEngine {
    store: Arc<dyn IdentityStore>,
    kyc: Arc<dyn KycClient>,
    chain: ChainConnector,
    kyc_api_base: String,
    progress_interval: Duration,
}

impl ReconciliationEngine {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        kyc: Arc<dyn KycClient>,
        chain: ChainConnector,
        kyc_api_base: impl Into<String>,
    ) -> Self {
        Self {
            store,
            kyc,
            chain,
            kyc_api_base: kyc_api_base.into(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Run both passes.
    ///
    /// Any error aborts the run. Store writes made before the error are kept;
    /// a later run re-derives the same decisions from the current state.
    pub async fn run(&self) -> Result<RunReport, ReconcileError> {
        let started = Instant::now();

        let (documents, identities) = self.build_document_map().map_err(|e| {
            tracing::error!(error = %e, "index pass failed");
            e
        })?;
        tracing::info!(
            identities,
            documents = documents.len(),
            shared = documents.shared_documents().count(),
            "index pass complete"
        );

        let mut report = self.evaluate_all(&documents, identities).await.map_err(|e| {
            tracing::error!(error = %e, "evaluation pass failed");
            e
        })?;
        report.identities = identities;
        report.documents = documents.len() as u64;
        report.elapsed = started.elapsed();

        tracing::info!("reconciliation complete: {report}");
        Ok(report)
    }

    /// Phase 1: index every document hash on every check of every identity.
    ///
    /// Returns the index and the number of identities scanned.
    pub fn build_document_map(&self) -> Result<(DocumentMap, u64), ReconcileError> {
        let mut documents = DocumentMap::new();
        let mut identities = 0u64;

        for identity in self.store.scan_identities()? {
            identities += 1;
            for check in self.store.get_checks(&identity.address)? {
                if let Some(hash) = check.document_hash {
                    documents.record(hash, identity.address);
                }
            }
        }

        Ok((documents, identities))
    }

    /// Phase 2: evaluate every identity against the index built by phase 1.
    pub async fn evaluate_all(
        &self,
        documents: &DocumentMap,
        total: u64,
    ) -> Result<RunReport, ReconcileError> {
        let mut report = RunReport::default();
        let mut progress = Progress::new(total, self.progress_interval);

        for identity in self.store.scan_identities()? {
            let outcome = self.evaluate_identity(&identity, documents).await?;
            report.record(&outcome);

            if progress.tick() {
                tracing::info!(
                    count = progress.count(),
                    total = progress.total(),
                    "evaluated {}%",
                    progress.percent()
                );
            }
        }

        Ok(report)
    }

    /// Decide what to do about a single identity.
    pub async fn evaluate_identity(
        &self,
        identity: &Identity,
        documents: &DocumentMap,
    ) -> Result<Outcome, ReconcileError> {
        let address = identity.address;

        let Some(check) = self.store.get_current_check(&address)? else {
            return Ok(Outcome::NotAwaitingDecision);
        };
        if check.status != CheckStatus::Pending {
            return Ok(Outcome::NotAwaitingDecision);
        }

        let applicants = self.store.get_applicants(&address)?;
        let Some(applicant) = applicants
            .iter()
            .find(|a| a.check_id.as_deref() == Some(check.id.as_str()))
        else {
            tracing::warn!(%address, check_id = %check.id, "no applicant for current check");
            return Ok(Outcome::MissingApplicant);
        };

        let href = check_href(&self.kyc_api_base, &applicant.id, &check.id);
        let verification = self.kyc.verify(&href).await?;

        if verification.pending {
            return Ok(Outcome::VerificationPending);
        }

        let Some(document_hash) = verification.document_hash.as_ref() else {
            tracing::warn!(
                address = %verification.address,
                reason = verification.reason.as_deref().unwrap_or("-"),
                "no document hash"
            );
            return Ok(Outcome::MissingDocumentHash);
        };

        if verification.is_used_document() {
            if documents.has_other_claimant(document_hash, &address) {
                tracing::debug!(
                    address = %verification.address,
                    document = %document_hash,
                    "document used by another address"
                );
                return Ok(Outcome::UsedDocumentConfirmed);
            }

            tracing::warn!(
                address = %verification.address,
                document = %document_hash,
                "document wrongly flagged as used; releasing it"
            );
            self.store.mark_document_as_unused(document_hash)?;
            let push = self.push(&verification, href).await?;
            return Ok(Outcome::DocumentReleased(push));
        }

        tracing::info!(address = %verification.address, "re-queueing verification");
        let push = self.push(&verification, href).await?;
        Ok(Outcome::Pushed(push))
    }

    /// Queue `href` for certification, first forgetting the address's pending
    /// transaction if the chain has no receipt for it.
    async fn push(
        &self,
        verification: &Verification,
        href: String,
    ) -> Result<PushResult, ReconcileError> {
        let address = verification.address;
        let mut dropped_transaction = None;

        match self.store.get_pending_transaction(&address)? {
            Some(tx_hash) => match self.chain.get_tx_receipt(&tx_hash).await? {
                None => {
                    tracing::warn!(%address, %tx_hash, "pending transaction not found; removing it");
                    self.store.remove_pending_transaction(&address)?;
                    dropped_transaction = Some(tx_hash);
                }
                Some(receipt) => {
                    tracing::info!(
                        %address,
                        %tx_hash,
                        block = ?receipt.block_number,
                        success = ?receipt.success,
                        "pending transaction has a receipt"
                    );
                }
            },
            None => tracing::debug!(%address, "no pending transaction"),
        }

        self.store.push(&href)?;
        Ok(PushResult {
            href,
            dropped_transaction,
        })
    }
}
