//! Hex-encoded JSON-RPC quantities (`"0x1a"`).

use crate::{strip_hex_prefix, TypesError};

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> Result<u128, TypesError> {
    let raw = strip_hex_prefix(s);
    if raw.is_empty() {
        return Err(TypesError::InvalidQuantity(s.to_string()));
    }
    u128::from_str_radix(raw, 16).map_err(|e| TypesError::InvalidQuantity(format!("{s}: {e}")))
}

/// Parse a quantity that must fit into a `u64` (block numbers, chain ids).
pub fn parse_quantity_u64(s: &str) -> Result<u64, TypesError> {
    let value = parse_quantity(s)?;
    u64::try_from(value).map_err(|_| TypesError::InvalidQuantity(format!("{s}: exceeds u64")))
}

/// Encode a quantity without leading zeros, as JSON-RPC requires.
pub fn format_quantity(value: u128) -> String {
    format!("0x{value:x}")
}
