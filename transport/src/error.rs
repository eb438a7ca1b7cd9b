use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chain node unreachable: {0}")]
    Unreachable(String),

    #[error("request to chain node failed: {0}")]
    RequestFailed(String),

    #[error("chain node answered with HTTP status {0}")]
    HttpStatus(u16),

    #[error("malformed JSON-RPC response: {0}")]
    Malformed(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            TransportError::Unreachable(format!("connection failed: {e}"))
        } else if e.is_decode() {
            TransportError::Malformed(e.to_string())
        } else {
            TransportError::RequestFailed(e.to_string())
        }
    }
}
