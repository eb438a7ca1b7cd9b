//! Abstract storage traits for the reconciler.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits; the
//! reconciliation engine asks for the combined [`IdentityStore`].

pub mod document;
pub mod error;
pub mod identity;
pub mod pending;
pub mod queue;

pub use document::DocumentStore;
pub use error::StoreError;
pub use identity::{IdentityRecordStore, IdentityScan};
pub use pending::PendingTransactionStore;
pub use queue::PushQueue;

/// Everything the reconciliation engine needs from persisted state.
///
/// Implemented automatically for any type providing the component traits.
pub trait IdentityStore:
    IdentityRecordStore + PendingTransactionStore + DocumentStore + PushQueue + Send + Sync
{
}

impl<T> IdentityStore for T where
    T: IdentityRecordStore + PendingTransactionStore + DocumentStore + PushQueue + Send + Sync
{
}
