//! Builder address type.
//!
//! A [`BuilderAddress`] is the registry's identity handle: a 20-byte value
//! derived from the builder's public key, formatted as `0x…` hex. The
//! registry treats it as opaque and comparable; derivation lives in
//! `atelier-keys`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ADDRESS_SIZE;
use crate::error::{AtelierError, Result};

/// A 20-byte builder identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderAddress {
    bytes: [u8; ADDRESS_SIZE],
}

impl BuilderAddress {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(AtelierError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Parses from hex string (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the zero address.
    pub fn zero() -> Self {
        Self {
            bytes: [0u8; ADDRESS_SIZE],
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl std::fmt::Debug for BuilderAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuilderAddress({})", self.to_hex())
    }
}

impl std::fmt::Display for BuilderAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for BuilderAddress {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Serde implementation that uses hex encoding
impl Serialize for BuilderAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BuilderAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = BuilderAddress::from_array([0x12; ADDRESS_SIZE]);
        let hex = addr.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 42); // "0x" + 40 hex chars

        let addr2 = BuilderAddress::from_hex(&hex).unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let addr: BuilderAddress = "ab".repeat(20).parse().unwrap();
        assert_eq!(addr.as_bytes(), &[0xAB; ADDRESS_SIZE]);
    }

    #[test]
    fn test_address_wrong_size() {
        let result = BuilderAddress::from_bytes(&[0u8; 19]);
        assert!(matches!(result, Err(AtelierError::InvalidAddress(_))));
    }

    #[test]
    fn test_address_zero() {
        let zero = BuilderAddress::zero();
        assert!(zero.is_zero());

        let non_zero = BuilderAddress::from_array([1; ADDRESS_SIZE]);
        assert!(!non_zero.is_zero());
    }

    #[test]
    fn test_address_serde() {
        let addr = BuilderAddress::from_array([0x42; ADDRESS_SIZE]);
        let json = serde_json::to_string(&addr).unwrap();
        assert!(json.contains("0x42"));

        let addr2: BuilderAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, addr2);
    }

    proptest! {
        #[test]
        fn prop_hex_roundtrip(bytes in proptest::array::uniform20(any::<u8>())) {
            let addr = BuilderAddress::from_array(bytes);
            let back = BuilderAddress::from_hex(&addr.to_hex()).unwrap();
            prop_assert_eq!(addr, back);
        }
    }
}
