//! Transaction and document hashes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{decode_fixed, impl_hex_serde, TypesError};

/// A 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl FromStr for TxHash {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<32>(s).map(Self)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl_hex_serde!(TxHash);

/// Content fingerprint of an identity document, as reported by the KYC provider.
///
/// Opaque to this system: it is only ever compared for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentHash(String);

impl DocumentHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocumentHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_display_is_full_hex() {
        let hash = TxHash::new([0xab; 32]);
        assert_eq!(hash.to_string(), format!("0x{}", "ab".repeat(32)));
        assert_eq!(format!("{hash:?}"), "TxHash(abababab)");
    }

    #[test]
    fn test_tx_hash_parse() {
        let s = format!("0x{}", "01".repeat(32));
        let hash: TxHash = s.parse().unwrap();
        assert_eq!(hash.as_bytes(), &[1u8; 32]);
        assert!(!hash.is_zero());
    }

    #[test]
    fn test_document_hash_is_transparent_in_json() {
        let doc = DocumentHash::new("f00d");
        assert_eq!(serde_json::to_string(&doc).unwrap(), "\"f00d\"");
    }
}
