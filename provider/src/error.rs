use thiserror::Error;

#[derive(Debug, Error)]
pub enum KycError {
    #[error("KYC provider unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP request to KYC provider failed: {0}")]
    RequestFailed(String),

    #[error("KYC provider answered {status} for {href}")]
    HttpStatus { status: u16, href: String },

    #[error("invalid response from KYC provider: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for KycError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            KycError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            KycError::Unreachable(format!("connection failed: {e}"))
        } else {
            KycError::RequestFailed(e.to_string())
        }
    }
}
