//! LMDB implementation of PendingTransactionStore.
//!
//! Key: 20-byte address. Value: 32-byte transaction hash. Putting a new hash
//! for an address overwrites the old one, so there is never more than one.

use kyc_store::{PendingTransactionStore, StoreError};
use kyc_types::{Address, TxHash};

use crate::{LmdbError, LmdbIdentityStore};

impl PendingTransactionStore for LmdbIdentityStore {
    fn set_pending_transaction(&self, address: &Address, hash: &TxHash) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.pending_db
            .put(&mut wtxn, address.as_bytes(), hash.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_pending_transaction(&self, address: &Address) -> Result<Option<TxHash>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(val) = self
            .pending_db
            .get(&rtxn, address.as_bytes())
            .map_err(LmdbError::from)?
        else {
            return Ok(None);
        };
        let bytes: [u8; 32] = val.try_into().map_err(|_| {
            LmdbError::Corruption(format!("pending tx for {address} has {} bytes", val.len()))
        })?;
        Ok(Some(TxHash::new(bytes)))
    }

    fn remove_pending_transaction(&self, address: &Address) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.pending_db
            .delete(&mut wtxn, address.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn pending_transaction_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.pending_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}
