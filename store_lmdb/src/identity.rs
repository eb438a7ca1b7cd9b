//! LMDB implementation of IdentityRecordStore.

use kyc_store::{IdentityRecordStore, IdentityScan, StoreError};
use kyc_types::{Address, IdentityRecord};

use crate::{LmdbError, LmdbIdentityStore};

/// Decode a 20-byte address key.
pub(crate) fn address_from_key(key: &[u8]) -> Result<Address, LmdbError> {
    let bytes: [u8; 20] = key.try_into().map_err(|_| {
        LmdbError::Corruption(format!("identity key has {} bytes, expected 20", key.len()))
    })?;
    Ok(Address::new(bytes))
}

impl IdentityRecordStore for LmdbIdentityStore {
    fn scan_identities(&self) -> Result<IdentityScan, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut addresses = Vec::new();
        for result in self.identities_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, _val) = result.map_err(LmdbError::from)?;
            addresses.push(address_from_key(key)?);
        }
        Ok(IdentityScan::new(addresses))
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.identities_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    fn get_identity(&self, address: &Address) -> Result<Option<IdentityRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(val) = self
            .identities_db
            .get(&rtxn, address.as_bytes())
            .map_err(LmdbError::from)?
        else {
            return Ok(None);
        };
        let record: IdentityRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
        Ok(Some(record))
    }

    fn put_identity(&self, address: &Address, record: &IdentityRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.identities_db
            .put(&mut wtxn, address.as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
