//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the reconciler (chain node, KYC provider,
//! persistent store) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return scripted values
//! - Record every call for later assertions
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod kyc;
pub mod store;
pub mod transport;

pub use kyc::NullKycClient;
pub use store::{NullIdentityStore, StoreWrite};
pub use transport::NullTransport;
