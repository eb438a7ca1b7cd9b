//! Used-document flags.

use kyc_types::DocumentHash;

use crate::StoreError;

/// Trait for the set of identity documents already backing a certification.
pub trait DocumentStore {
    /// Flag `hash` as used.
    fn mark_document_as_used(&self, hash: &DocumentHash) -> Result<(), StoreError>;

    /// Clear the used flag so another check may validly present the document.
    ///
    /// Clearing an unflagged document is a no-op.
    fn mark_document_as_unused(&self, hash: &DocumentHash) -> Result<(), StoreError>;

    fn is_document_used(&self, hash: &DocumentHash) -> Result<bool, StoreError>;
}
