use kyc_transport::TransportError;
use kyc_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected {method} response: {reason}")]
    InvalidResponse { method: &'static str, reason: String },

    #[error("contract call to {to} failed: {reason}")]
    ContractCall { to: Address, reason: String },
}

impl ChainError {
    pub(crate) fn invalid(method: &'static str, reason: impl ToString) -> Self {
        ChainError::InvalidResponse {
            method,
            reason: reason.to_string(),
        }
    }
}
