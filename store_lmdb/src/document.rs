//! LMDB implementation of DocumentStore. Presence of the key is the flag.

use kyc_store::{DocumentStore, StoreError};
use kyc_types::DocumentHash;

use crate::{LmdbError, LmdbIdentityStore};

impl DocumentStore for LmdbIdentityStore {
    fn mark_document_as_used(&self, hash: &DocumentHash) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.documents_db
            .put(&mut wtxn, hash.as_str().as_bytes(), &[])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn mark_document_as_unused(&self, hash: &DocumentHash) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.documents_db
            .delete(&mut wtxn, hash.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn is_document_used(&self, hash: &DocumentHash) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let found = self
            .documents_db
            .get(&rtxn, hash.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_flag_lifecycle() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LmdbIdentityStore::open_with_map_size(dir.path(), 16 * 1024 * 1024).unwrap();
        let doc = DocumentHash::new("passport-1");

        assert!(!store.is_document_used(&doc).unwrap());
        store.mark_document_as_used(&doc).unwrap();
        assert!(store.is_document_used(&doc).unwrap());
        store.mark_document_as_unused(&doc).unwrap();
        assert!(!store.is_document_used(&doc).unwrap());
        // Clearing twice is fine.
        store.mark_document_as_unused(&doc).unwrap();
    }
}
