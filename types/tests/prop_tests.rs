use proptest::prelude::*;

use kyc_types::quantity::{format_quantity, parse_quantity};
use kyc_types::{Address, TxHash};

proptest! {
    /// Address display output always parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Parsing is case-insensitive.
    #[test]
    fn address_parse_ignores_case(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let upper = format!("0x{}", addr.to_string()[2..].to_uppercase());
        prop_assert_eq!(upper.parse::<Address>().unwrap(), addr);
    }

    /// TxHash display output always parses back.
    #[test]
    fn tx_hash_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(hash.to_string().parse::<TxHash>().unwrap(), hash);
    }

    /// Quantities never carry leading zeros and parse back.
    #[test]
    fn quantity_format_is_canonical(value in any::<u128>()) {
        let s = format_quantity(value);
        prop_assert!(s == "0x0" || !s.starts_with("0x0"));
        prop_assert_eq!(parse_quantity(&s).unwrap(), value);
    }
}
