//! JSON-RPC transports for the chain node.
//!
//! Two variants implement [`Transport`]:
//! - [`HttpTransport`] performs every round trip, for callers that need
//!   canonical state on each call.
//! - [`CachingTransport`] wraps another transport and memoizes the results
//!   of an enumerated set of methods whose answers cannot change while the
//!   process runs (contract code, chain id). Everything else passes through.

pub mod caching;
pub mod error;
pub mod http;

pub use caching::{CachingTransport, DEFAULT_CACHED_METHODS};
pub use error::TransportError;
pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A JSON-RPC method invoker.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `method` with positional `params` and return the `result` member.
    ///
    /// A JSON `null` result is returned as [`Value::Null`], not as an error.
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        (**self).call(method, params).await
    }
}
