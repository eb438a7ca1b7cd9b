//! Typed façade over the chain node's JSON-RPC interface.
//!
//! [`ChainConnector`] turns raw JSON-RPC values into workspace types. It does
//! no ABI work: contract calls take and return raw bytes.

pub mod connector;
pub mod error;

pub use connector::ChainConnector;
pub use error::ChainError;
