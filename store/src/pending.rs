//! Pending certification transaction ledger.

use kyc_types::{Address, TxHash};

use crate::StoreError;

/// Trait for tracking in-flight certification transactions.
///
/// At most one transaction hash is recorded per address.
pub trait PendingTransactionStore {
    /// Record `hash` as the in-flight transaction for `address`, replacing
    /// any previous entry.
    fn set_pending_transaction(&self, address: &Address, hash: &TxHash) -> Result<(), StoreError>;

    /// The in-flight transaction for `address`, if any.
    fn get_pending_transaction(&self, address: &Address) -> Result<Option<TxHash>, StoreError>;

    /// Forget the in-flight transaction for `address`.
    ///
    /// Removing an absent entry is a no-op.
    fn remove_pending_transaction(&self, address: &Address) -> Result<(), StoreError>;

    /// Number of addresses with an in-flight transaction.
    fn pending_transaction_count(&self) -> Result<u64, StoreError>;

    fn has_pending_transaction(&self, address: &Address) -> Result<bool, StoreError> {
        Ok(self.get_pending_transaction(address)?.is_some())
    }
}
