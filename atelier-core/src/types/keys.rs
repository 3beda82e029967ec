//! Key types for the Atelier registry.
//!
//! A registered key is stored as two parts:
//!
//! - [`PublicKeyBytes`]: the 32-byte X coordinate of a secp256k1 point
//! - [`KeyParity`]: the single bit selecting which of the two Y roots the
//!   point uses, needed to recover the uncompressed key from the stored form
//!
//! The registry never verifies that a supplied pair is a well-formed curve
//! point or that the caller controls the matching private key; that trust
//! boundary belongs to the callers.

use serde::{Deserialize, Serialize};

use crate::constants::PUBLIC_KEY_SIZE;
use crate::error::{AtelierError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PARITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Y-coordinate parity of a registered public key.
///
/// Serialized as a single bit (`0` for even, `1` for odd), matching the SEC1
/// compressed tag bytes `0x02`/`0x03`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyParity {
    /// Even Y coordinate (SEC1 tag `0x02`).
    #[default]
    Even,
    /// Odd Y coordinate (SEC1 tag `0x03`).
    Odd,
}

impl KeyParity {
    /// Returns the parity as a bit.
    pub fn bit(self) -> u8 {
        match self {
            KeyParity::Even => 0,
            KeyParity::Odd => 1,
        }
    }

    /// Creates from a bit value.
    pub fn from_bit(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(KeyParity::Even),
            1 => Ok(KeyParity::Odd),
            other => Err(AtelierError::InvalidKeyEncoding(format!(
                "parity must be 0 or 1, got {other}"
            ))),
        }
    }

    /// Returns true for odd parity.
    pub fn is_odd(self) -> bool {
        matches!(self, KeyParity::Odd)
    }
}

impl Serialize for KeyParity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bit())
    }
}

impl<'de> Deserialize<'de> for KeyParity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bit = u8::deserialize(deserializer)?;
        Self::from_bit(bit).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC KEY BYTES
// ═══════════════════════════════════════════════════════════════════════════════

/// The 32-byte public key material stored in the registry.
///
/// This is the X coordinate of the builder's secp256k1 public key; combined
/// with the [`KeyParity`] bit it reconstructs the full point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyBytes {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl PublicKeyBytes {
    /// Creates from raw bytes.
    ///
    /// # Errors
    /// Returns error if `bytes` length doesn't match `PUBLIC_KEY_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(AtelierError::InvalidKeyEncoding(format!(
                "expected {} key bytes, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; PUBLIC_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the key as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.bytes
    }

    /// Returns the hex-encoded key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Creates from a hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show first/last 4 bytes for readability
        write!(
            f,
            "PublicKeyBytes({}...{})",
            hex::encode(&self.bytes[..4]),
            hex::encode(&self.bytes[PUBLIC_KEY_SIZE - 4..])
        )
    }
}

impl Default for PublicKeyBytes {
    fn default() -> Self {
        Self {
            bytes: [0u8; PUBLIC_KEY_SIZE],
        }
    }
}

// Serde implementation that uses hex encoding
impl Serialize for PublicKeyBytes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKeyBytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTERED KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// The `(parity, public_key)` pair supplied to every registry operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredKey {
    /// Y-coordinate parity bit.
    pub parity: KeyParity,
    /// X coordinate of the public key.
    pub public_key: PublicKeyBytes,
}

impl RegisteredKey {
    /// Creates a new registered key.
    pub fn new(parity: KeyParity, public_key: PublicKeyBytes) -> Self {
        Self { parity, public_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, KeyParity::Even; "even bit")]
    #[test_case(1, KeyParity::Odd; "odd bit")]
    fn test_parity_from_bit(bit: u8, expected: KeyParity) {
        assert_eq!(KeyParity::from_bit(bit).unwrap(), expected);
        assert_eq!(expected.bit(), bit);
    }

    #[test]
    fn test_parity_rejects_other_bits() {
        assert!(KeyParity::from_bit(2).is_err());
        assert!(KeyParity::from_bit(255).is_err());
    }

    #[test]
    fn test_parity_serde_as_bit() {
        let json = serde_json::to_string(&KeyParity::Odd).unwrap();
        assert_eq!(json, "1");

        let parity: KeyParity = serde_json::from_str("0").unwrap();
        assert_eq!(parity, KeyParity::Even);

        assert!(serde_json::from_str::<KeyParity>("3").is_err());
    }

    #[test]
    fn test_public_key_from_bytes() {
        let bytes = [42u8; PUBLIC_KEY_SIZE];
        let pk = PublicKeyBytes::from_bytes(&bytes).unwrap();
        assert_eq!(pk.as_bytes(), &bytes);
    }

    #[test]
    fn test_public_key_wrong_size() {
        let result = PublicKeyBytes::from_bytes(&[0u8; 16]);
        assert!(matches!(result, Err(AtelierError::InvalidKeyEncoding(_))));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = PublicKeyBytes::from_array([0xAB; PUBLIC_KEY_SIZE]);
        let hex = pk.to_hex();
        let pk2 = PublicKeyBytes::from_hex(&hex).unwrap();
        assert_eq!(pk, pk2);
    }

    #[test]
    fn test_public_key_debug_truncated() {
        let pk = PublicKeyBytes::from_array([0x11; PUBLIC_KEY_SIZE]);
        let debug = format!("{pk:?}");
        assert!(debug.contains("..."));
        assert!(debug.len() < 40);
    }

    #[test]
    fn test_registered_key_serde_roundtrip() {
        let key = RegisteredKey::new(
            KeyParity::Odd,
            PublicKeyBytes::from_array([0x12; PUBLIC_KEY_SIZE]),
        );
        let json = serde_json::to_string(&key).unwrap();
        let key2: RegisteredKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, key2);
    }
}
