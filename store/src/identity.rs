//! Identity records and scanning.

use kyc_types::{Address, Applicant, Check, Identity, IdentityRecord};

use crate::StoreError;

/// A single pass over every identity known when the scan started.
///
/// The key set is captured up front; records are only read when the caller
/// asks the store for them, so identities are materialized one at a time.
/// Writes made while the scan is running are visible to records read
/// afterwards, and to any later scan.
#[derive(Debug)]
pub struct IdentityScan {
    addresses: std::vec::IntoIter<Address>,
}

impl IdentityScan {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self {
            addresses: addresses.into_iter(),
        }
    }
}

impl Iterator for IdentityScan {
    type Item = Identity;

    fn next(&mut self) -> Option<Identity> {
        self.addresses.next().map(Identity::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.addresses.size_hint()
    }
}

impl ExactSizeIterator for IdentityScan {}

/// Trait for reading and writing identity records.
pub trait IdentityRecordStore {
    /// Start a scan over all identities, in key order.
    fn scan_identities(&self) -> Result<IdentityScan, StoreError>;

    /// Number of identities currently stored.
    fn identity_count(&self) -> Result<u64, StoreError>;

    /// Load the full record for `address`; `None` if it does not exist.
    fn get_identity(&self, address: &Address) -> Result<Option<IdentityRecord>, StoreError>;

    /// Create or replace the record for `address`.
    fn put_identity(&self, address: &Address, record: &IdentityRecord) -> Result<(), StoreError>;

    /// The check currently driving certification for `address`.
    fn get_current_check(&self, address: &Address) -> Result<Option<Check>, StoreError> {
        Ok(self
            .get_identity(address)?
            .and_then(|record| record.current_check))
    }

    /// Every applicant recorded for `address`.
    fn get_applicants(&self, address: &Address) -> Result<Vec<Applicant>, StoreError> {
        Ok(self
            .get_identity(address)?
            .map(|record| record.applicants)
            .unwrap_or_default())
    }

    /// Every check recorded for `address`.
    fn get_checks(&self, address: &Address) -> Result<Vec<Check>, StoreError> {
        Ok(self
            .get_identity(address)?
            .map(|record| record.checks)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_yields_every_address_once() {
        let a = Address::new([1; 20]);
        let b = Address::new([2; 20]);
        let scan = IdentityScan::new(vec![a, b]);
        assert_eq!(scan.len(), 2);
        let seen: Vec<Address> = scan.map(|identity| identity.address).collect();
        assert_eq!(seen, vec![a, b]);
    }

    #[test]
    fn test_empty_scan() {
        assert_eq!(IdentityScan::new(Vec::new()).next(), None);
    }
}
