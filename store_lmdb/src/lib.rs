//! LMDB storage backend for the reconciler.
//!
//! Implements all storage traits from `kyc-store` using the `heed` LMDB
//! bindings. Each logical store maps to one database within a single
//! environment:
//!
//! | database         | key                         | value                    |
//! |------------------|-----------------------------|--------------------------|
//! | `identities`     | 20-byte address             | bincode `IdentityRecord` |
//! | `pending_tx`     | 20-byte address             | 32-byte tx hash          |
//! | `used_documents` | document hash (UTF-8)       | empty                    |
//! | `push_queue`     | big-endian `u64` sequence   | href (UTF-8)             |

pub mod document;
pub mod environment;
pub mod error;
pub mod identity;
pub mod pending;
pub mod queue;

pub use environment::LmdbIdentityStore;
pub use error::LmdbError;
