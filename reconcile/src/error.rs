use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("store error: {0}")]
    Store(#[from] kyc_store::StoreError),

    #[error("KYC provider error: {0}")]
    Kyc(#[from] kyc_provider::KycError),

    #[error("chain error: {0}")]
    Chain(#[from] kyc_chain::ChainError),

    #[error("transport error: {0}")]
    Transport(#[from] kyc_transport::TransportError),

    #[error("config error: {0}")]
    Config(String),
}
