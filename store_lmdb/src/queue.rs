//! LMDB implementation of PushQueue.
//!
//! Keys are big-endian sequence numbers so LMDB's lexicographic order is
//! insertion order. The next sequence is one past the current last key,
//! read inside the same write transaction.

use kyc_store::{PushQueue, StoreError};

use crate::{LmdbError, LmdbIdentityStore};

fn sequence_from_key(key: &[u8]) -> Result<u64, LmdbError> {
    let bytes: [u8; 8] = key.try_into().map_err(|_| {
        LmdbError::Corruption(format!("push queue key has {} bytes, expected 8", key.len()))
    })?;
    Ok(u64::from_be_bytes(bytes))
}

impl PushQueue for LmdbIdentityStore {
    fn push(&self, href: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let next = match self.queue_db.last(&wtxn).map_err(LmdbError::from)? {
            Some((key, _)) => sequence_from_key(key)? + 1,
            None => 0,
        };
        self.queue_db
            .put(&mut wtxn, &next.to_be_bytes(), href.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn pop(&self) -> Result<Option<String>, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let Some((key, val)) = self.queue_db.first(&wtxn).map_err(LmdbError::from)? else {
            return Ok(None);
        };
        let key = key.to_vec();
        let href = String::from_utf8(val.to_vec())
            .map_err(|e| LmdbError::Corruption(format!("push queue entry: {e}")))?;
        self.queue_db
            .delete(&mut wtxn, &key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(Some(href))
    }

    fn queue_len(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.queue_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}
