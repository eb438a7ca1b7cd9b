//! Uncached JSON-RPC over HTTP.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::{Transport, TransportError};

/// Default timeout for a single RPC round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON-RPC 2.0 client that POSTs every call to the node endpoint.
pub struct HttpTransport {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Value,
}

impl HttpTransport {
    /// Create a transport for `url` with the default timeout.
    pub fn new(url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom per-request timeout.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("building HTTP client: {e}")))?;
        Ok(Self {
            url: url.to_string(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: &params,
        };

        tracing::trace!(method, id, "rpc call");

        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        decode_response(body)
    }
}

/// Extract the `result` member of a JSON-RPC response object.
///
/// An `error` member wins over `result`. A response with neither is malformed;
/// `"result": null` is a valid empty answer.
pub(crate) fn decode_response(body: Value) -> Result<Value, TransportError> {
    let Value::Object(mut object) = body else {
        return Err(TransportError::Malformed(format!(
            "expected a JSON object, got {body}"
        )));
    };

    match object.remove("error") {
        None | Some(Value::Null) => {}
        Some(error) => {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(TransportError::Rpc { code, message });
        }
    }

    object
        .remove("result")
        .ok_or_else(|| TransportError::Malformed("response has neither result nor error".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_result() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": "0x4a817c800"});
        assert_eq!(decode_response(body).unwrap(), json!("0x4a817c800"));
    }

    #[test]
    fn test_decode_null_result_is_ok() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": null});
        assert_eq!(decode_response(body).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_rpc_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32601, "message": "Method not found"}
        });
        match decode_response(body) {
            Err(TransportError::Rpc { code, message }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found");
            }
            other => panic!("expected RPC error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_result_is_malformed() {
        let body = json!({"jsonrpc": "2.0", "id": 1});
        assert!(matches!(
            decode_response(body),
            Err(TransportError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_non_object_is_malformed() {
        assert!(matches!(
            decode_response(json!([1, 2])),
            Err(TransportError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let params = json!(["0xabc", "latest"]);
        let req = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "eth_getCode",
            params: &params,
        };
        let encoded = serde_json::to_value(&req).unwrap();
        assert_eq!(
            encoded,
            json!({"jsonrpc": "2.0", "id": 7, "method": "eth_getCode", "params": ["0xabc", "latest"]})
        );
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new("http://127.0.0.1:8545").unwrap();
        assert_eq!(transport.url(), "http://127.0.0.1:8545");
    }
}
