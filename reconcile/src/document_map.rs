//! Scan-scoped index of which addresses presented which document.

use std::collections::{BTreeMap, BTreeSet};

use kyc_types::{Address, DocumentHash};

/// Maps each document hash to the set of addresses with a check that
/// referenced it.
///
/// Built from scratch by the index pass of every run and dropped with it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentMap {
    claims: BTreeMap<DocumentHash, BTreeSet<Address>>,
}

impl DocumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `address` presented the document `hash`.
    pub fn record(&mut self, hash: DocumentHash, address: Address) {
        self.claims.entry(hash).or_default().insert(address);
    }

    /// Addresses that presented `hash`, if any did.
    pub fn claimants(&self, hash: &DocumentHash) -> Option<&BTreeSet<Address>> {
        self.claims.get(hash)
    }

    /// Whether some address other than `address` presented `hash`.
    pub fn has_other_claimant(&self, hash: &DocumentHash, address: &Address) -> bool {
        self.claims
            .get(hash)
            .is_some_and(|claimants| claimants.iter().any(|a| a != address))
    }

    /// Number of distinct document hashes.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Documents presented by more than one address.
    pub fn shared_documents(&self) -> impl Iterator<Item = (&DocumentHash, &BTreeSet<Address>)> {
        self.claims.iter().filter(|(_, claimants)| claimants.len() > 1)
    }
}
