//! Shared types for the KYC certification reconciler.
//!
//! This crate defines the values passed between every other crate in the
//! workspace: chain addresses and hashes, KYC applicants and checks,
//! verification results, and transaction receipts.

pub mod address;
pub mod check;
pub mod error;
pub mod hash;
pub mod identity;
pub mod quantity;
pub mod receipt;
pub mod verification;

pub use address::Address;
pub use check::{Applicant, Check, CheckStatus};
pub use error::TypesError;
pub use hash::{DocumentHash, TxHash};
pub use identity::{Identity, IdentityRecord};
pub use receipt::TxReceipt;
pub use verification::{Verification, USED_DOCUMENT_REASON};

/// Decode a `0x`-prefixed (or bare) hex string into exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], TypesError> {
    let bytes = decode_hex(s)?;
    if bytes.len() != N {
        return Err(TypesError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Decode a `0x`-prefixed (or bare) hex string of any length.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, TypesError> {
    let raw = strip_hex_prefix(s);
    hex::decode(raw).map_err(|e| TypesError::InvalidHex(format!("{s}: {e}")))
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Implements string-based serde for fixed-size hex newtypes.
macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_serde;
