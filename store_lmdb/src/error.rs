use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted entry: {0}")]
    Corruption(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for kyc_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::NotFound(key) => kyc_store::StoreError::NotFound(key),
            LmdbError::Serialization(msg) => kyc_store::StoreError::Serialization(msg),
            LmdbError::Corruption(msg) => kyc_store::StoreError::Corruption(msg),
            other => kyc_store::StoreError::Backend(other.to_string()),
        }
    }
}
