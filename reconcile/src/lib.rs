//! Identity reconciliation engine.
//!
//! A run makes two passes over every identity in the store:
//!
//! 1. **Index**: record, for every document hash seen on any check, which
//!    addresses presented it ([`DocumentMap`]).
//! 2. **Evaluate**: for each identity awaiting a decision, fetch the
//!    provider's verification and decide whether to re-queue it for
//!    certification, release a stale used-document flag, or leave it alone.
//!
//! Every decision to re-queue first reconciles the address's pending
//! certification transaction against the chain, so a dropped transaction
//! never blocks a new submission.

pub mod config;
pub mod document_map;
pub mod engine;
pub mod error;
pub mod report;

pub use config::ReconcilerConfig;
pub use document_map::DocumentMap;
pub use engine::ReconciliationEngine;
pub use error::ReconcileError;
pub use report::{Outcome, PushResult, RunReport};
