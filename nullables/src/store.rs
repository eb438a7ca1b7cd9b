//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use kyc_store::{
    DocumentStore, IdentityRecordStore, IdentityScan, PendingTransactionStore, PushQueue,
    StoreError,
};
use kyc_types::{Address, DocumentHash, IdentityRecord, TxHash};

/// A mutation applied to a [`NullIdentityStore`], in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreWrite {
    PutIdentity(Address),
    SetPendingTransaction(Address, TxHash),
    RemovePendingTransaction(Address),
    MarkDocumentUsed(DocumentHash),
    MarkDocumentUnused(DocumentHash),
    Push(String),
    Pop,
}

/// An in-memory identity store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
///
/// Identities are scanned in address order, like the LMDB backend.
pub struct NullIdentityStore {
    identities: Mutex<BTreeMap<Address, IdentityRecord>>,
    pending: Mutex<HashMap<Address, TxHash>>,
    used_documents: Mutex<HashSet<DocumentHash>>,
    queue: Mutex<VecDeque<String>>,
    writes: Mutex<Vec<StoreWrite>>,
    fail_scans: AtomicBool,
}

impl NullIdentityStore {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(BTreeMap::new()),
            pending: Mutex::new(HashMap::new()),
            used_documents: Mutex::new(HashSet::new()),
            queue: Mutex::new(VecDeque::new()),
            writes: Mutex::new(Vec::new()),
            fail_scans: AtomicBool::new(false),
        }
    }

    /// Seed an identity without recording a write.
    pub fn insert_identity(&self, address: Address, record: IdentityRecord) {
        self.identities.lock().unwrap().insert(address, record);
    }

    /// Seed a pending transaction without recording a write.
    pub fn insert_pending_transaction(&self, address: Address, hash: TxHash) {
        self.pending.lock().unwrap().insert(address, hash);
    }

    /// Seed a used-document flag without recording a write.
    pub fn insert_used_document(&self, hash: DocumentHash) {
        self.used_documents.lock().unwrap().insert(hash);
    }

    /// Make every subsequent scan fail with a backend error.
    pub fn fail_scans(&self, fail: bool) {
        self.fail_scans.store(fail, Ordering::SeqCst);
    }

    /// Every mutation so far, in order.
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    /// Every href pushed so far, in order, including ones already popped.
    pub fn pushed(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|w| match w {
                StoreWrite::Push(href) => Some(href.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, write: StoreWrite) {
        self.writes.lock().unwrap().push(write);
    }
}

impl Default for NullIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRecordStore for NullIdentityStore {
    fn scan_identities(&self) -> Result<IdentityScan, StoreError> {
        if self.fail_scans.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("scan failed".into()));
        }
        let addresses = self.identities.lock().unwrap().keys().copied().collect();
        Ok(IdentityScan::new(addresses))
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.identities.lock().unwrap().len() as u64)
    }

    fn get_identity(&self, address: &Address) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self.identities.lock().unwrap().get(address).cloned())
    }

    fn put_identity(&self, address: &Address, record: &IdentityRecord) -> Result<(), StoreError> {
        self.identities
            .lock()
            .unwrap()
            .insert(*address, record.clone());
        self.record(StoreWrite::PutIdentity(*address));
        Ok(())
    }
}

impl PendingTransactionStore for NullIdentityStore {
    fn set_pending_transaction(&self, address: &Address, hash: &TxHash) -> Result<(), StoreError> {
        self.pending.lock().unwrap().insert(*address, *hash);
        self.record(StoreWrite::SetPendingTransaction(*address, *hash));
        Ok(())
    }

    fn get_pending_transaction(&self, address: &Address) -> Result<Option<TxHash>, StoreError> {
        Ok(self.pending.lock().unwrap().get(address).copied())
    }

    fn remove_pending_transaction(&self, address: &Address) -> Result<(), StoreError> {
        self.pending.lock().unwrap().remove(address);
        self.record(StoreWrite::RemovePendingTransaction(*address));
        Ok(())
    }

    fn pending_transaction_count(&self) -> Result<u64, StoreError> {
        Ok(self.pending.lock().unwrap().len() as u64)
    }
}

impl DocumentStore for NullIdentityStore {
    fn mark_document_as_used(&self, hash: &DocumentHash) -> Result<(), StoreError> {
        self.used_documents.lock().unwrap().insert(hash.clone());
        self.record(StoreWrite::MarkDocumentUsed(hash.clone()));
        Ok(())
    }

    fn mark_document_as_unused(&self, hash: &DocumentHash) -> Result<(), StoreError> {
        self.used_documents.lock().unwrap().remove(hash);
        self.record(StoreWrite::MarkDocumentUnused(hash.clone()));
        Ok(())
    }

    fn is_document_used(&self, hash: &DocumentHash) -> Result<bool, StoreError> {
        Ok(self.used_documents.lock().unwrap().contains(hash))
    }
}

impl PushQueue for NullIdentityStore {
    fn push(&self, href: &str) -> Result<(), StoreError> {
        self.queue.lock().unwrap().push_back(href.to_string());
        self.record(StoreWrite::Push(href.to_string()));
        Ok(())
    }

    fn pop(&self) -> Result<Option<String>, StoreError> {
        let href = self.queue.lock().unwrap().pop_front();
        self.record(StoreWrite::Pop);
        Ok(href)
    }

    fn queue_len(&self) -> Result<u64, StoreError> {
        Ok(self.queue.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_store::IdentityStore;

    fn assert_identity_store<S: IdentityStore>(_: &S) {}

    #[test]
    fn test_is_a_full_identity_store() {
        assert_identity_store(&NullIdentityStore::new());
    }

    #[test]
    fn test_seeding_does_not_count_as_writes() {
        let store = NullIdentityStore::new();
        let addr = Address::new([1; 20]);
        store.insert_identity(addr, IdentityRecord::default());
        store.insert_pending_transaction(addr, TxHash::new([2; 32]));
        store.insert_used_document(DocumentHash::new("d"));

        assert!(store.writes().is_empty());
        assert!(store.has_pending_transaction(&addr).unwrap());
        assert!(store.is_document_used(&DocumentHash::new("d")).unwrap());
    }

    #[test]
    fn test_scan_in_address_order() {
        let store = NullIdentityStore::new();
        store.insert_identity(Address::new([9; 20]), IdentityRecord::default());
        store.insert_identity(Address::new([4; 20]), IdentityRecord::default());
        let seen: Vec<_> = store
            .scan_identities()
            .unwrap()
            .map(|identity| identity.address)
            .collect();
        assert_eq!(seen, vec![Address::new([4; 20]), Address::new([9; 20])]);
    }

    #[test]
    fn test_queue_and_write_log() {
        let store = NullIdentityStore::new();
        store.push("a").unwrap();
        store.push("b").unwrap();
        assert_eq!(store.pop().unwrap().as_deref(), Some("a"));
        assert_eq!(store.queue_len().unwrap(), 1);
        assert_eq!(store.pushed(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_absent_pending_is_noop() {
        let store = NullIdentityStore::new();
        let addr = Address::new([1; 20]);
        store.remove_pending_transaction(&addr).unwrap();
        assert_eq!(store.pending_transaction_count().unwrap(), 0);
    }

    #[test]
    fn test_failing_scans() {
        let store = NullIdentityStore::new();
        store.fail_scans(true);
        assert!(store.scan_identities().is_err());
        store.fail_scans(false);
        assert!(store.scan_identities().is_ok());
    }
}
