//! Mined transaction receipts.

use serde::{Deserialize, Serialize};

use crate::TxHash;

/// The parts of a transaction receipt the reconciler looks at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    /// `None` while the node reports the transaction as not yet in a block.
    pub block_number: Option<u64>,
    pub gas_used: u128,
    /// Post-Byzantium execution status: `Some(true)` on success.
    pub success: Option<bool>,
}

impl TxReceipt {
    pub fn is_mined(&self) -> bool {
        self.block_number.is_some()
    }
}
