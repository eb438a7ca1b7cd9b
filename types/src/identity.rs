//! Identities tracked by the store.

use serde::{Deserialize, Serialize};

use crate::{Address, Applicant, Check};

/// Handle for one identity yielded by a store scan.
///
/// Only the address is materialized; applicants, checks and the current
/// check are fetched lazily from the store that produced the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    pub address: Address,
}

impl Identity {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

/// Full persisted state of an identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// The check currently driving certification, if one was opened.
    pub current_check: Option<Check>,
    pub applicants: Vec<Applicant>,
    /// Every check ever opened for this identity, current one included.
    pub checks: Vec<Check>,
}

impl IdentityRecord {
    /// Record a newly opened check and make it current.
    pub fn open_check(&mut self, applicant_id: impl Into<String>, check: Check) {
        self.applicants
            .push(Applicant::new(applicant_id, check.id.clone()));
        self.checks.retain(|c| c.id != check.id);
        self.checks.push(check.clone());
        self.current_check = Some(check);
    }
}
