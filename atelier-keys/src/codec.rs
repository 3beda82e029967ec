//! Conversion between SEC1 key encodings and the registry's stored form.
//!
//! ## Stored form
//!
//! ```text
//! SEC1 compressed: tag (02|03) || X (32 bytes)
//!                     │             │
//!                  parity bit    key bytes
//! ```
//!
//! The registry keeps the two parts separately; recombining them yields the
//! compressed point, and decompression recovers the full key.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use atelier_core::constants::{
    ADDRESS_SIZE, COMPRESSED_KEY_SIZE, KECCAK256_SIZE, PUBLIC_KEY_SIZE, SEC1_TAG_EVEN,
    SEC1_TAG_ODD, SEC1_TAG_UNCOMPRESSED, UNCOMPRESSED_KEY_SIZE,
};
use atelier_core::error::{AtelierError, Result};
use atelier_core::types::{BuilderAddress, KeyParity, PublicKeyBytes, RegisteredKey};

use crate::hash::keccak256;

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNING SECRET
// ═══════════════════════════════════════════════════════════════════════════════

/// A secp256k1 private scalar, zeroized on drop.
///
/// Never expose this key in logs or error messages.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl SigningSecret {
    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the hex-encoded scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose secret key content
        write!(f, "SigningSecret([REDACTED])")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENCODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Encodes a raw public key into the registry's stored form.
///
/// Accepts hex (with or without `0x`) in any of the usual shapes: SEC1
/// uncompressed (65 bytes), bare `X || Y` (64 bytes), or SEC1 compressed
/// (33 bytes). The input must be a valid secp256k1 point.
///
/// # Errors
/// `InvalidKeyEncoding` for bad hex, unsupported lengths, or off-curve input.
pub fn encode_public_key(raw_hex: &str) -> Result<RegisteredKey> {
    let s = raw_hex.strip_prefix("0x").unwrap_or(raw_hex);
    let bytes = hex::decode(s)
        .map_err(|e| AtelierError::InvalidKeyEncoding(format!("public key hex: {e}")))?;

    let sec1 = match bytes.len() {
        UNCOMPRESSED_KEY_SIZE | COMPRESSED_KEY_SIZE => bytes,
        len if len == 2 * PUBLIC_KEY_SIZE => {
            let mut prefixed = Vec::with_capacity(UNCOMPRESSED_KEY_SIZE);
            prefixed.push(SEC1_TAG_UNCOMPRESSED);
            prefixed.extend_from_slice(&bytes);
            prefixed
        }
        other => {
            return Err(AtelierError::InvalidKeyEncoding(format!(
                "unsupported public key length: {other} bytes"
            )))
        }
    };

    let point = k256::PublicKey::from_sec1_bytes(&sec1)
        .map_err(|_| AtelierError::InvalidKeyEncoding("not a valid secp256k1 point".into()))?;

    Ok(encode_point(&point))
}

/// Derives the registry encoding of the public key behind a private scalar.
///
/// # Errors
/// `InvalidKeyEncoding` for bad hex or a scalar outside the curve order.
pub fn export_public_key(private_hex: &str) -> Result<RegisteredKey> {
    let s = private_hex.strip_prefix("0x").unwrap_or(private_hex);
    let mut bytes = hex::decode(s)
        .map_err(|e| AtelierError::InvalidKeyEncoding(format!("private key hex: {e}")))?;

    let secret = k256::SecretKey::from_slice(&bytes).map_err(|_| {
        AtelierError::InvalidKeyEncoding("not a valid secp256k1 private scalar".into())
    })?;
    bytes.zeroize();

    Ok(encode_point(&secret.public_key()))
}

/// Generates a fresh secp256k1 identity.
pub fn generate_keypair() -> (SigningSecret, RegisteredKey) {
    let secret = k256::SecretKey::random(&mut OsRng);
    let key = encode_point(&secret.public_key());

    let mut field_bytes = secret.to_bytes();
    let mut scalar = [0u8; PUBLIC_KEY_SIZE];
    scalar.copy_from_slice(&field_bytes);
    field_bytes.as_mut_slice().zeroize();

    (SigningSecret::from_array(scalar), key)
}

fn encode_point(public: &k256::PublicKey) -> RegisteredKey {
    let compressed = public.to_encoded_point(true);
    let bytes = compressed.as_bytes();

    let parity = if bytes[0] == SEC1_TAG_ODD {
        KeyParity::Odd
    } else {
        KeyParity::Even
    };

    let mut x = [0u8; PUBLIC_KEY_SIZE];
    x.copy_from_slice(&bytes[1..]);

    RegisteredKey::new(parity, PublicKeyBytes::from_array(x))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Reassembles the SEC1 compressed encoding from the stored form.
pub fn decode_public_key(key: &RegisteredKey) -> [u8; COMPRESSED_KEY_SIZE] {
    let mut out = [0u8; COMPRESSED_KEY_SIZE];
    out[0] = if key.parity.is_odd() {
        SEC1_TAG_ODD
    } else {
        SEC1_TAG_EVEN
    };
    out[1..].copy_from_slice(key.public_key.as_bytes());
    out
}

/// Recovers the SEC1 uncompressed encoding from the stored form.
///
/// # Errors
/// `InvalidKeyEncoding` if the stored X coordinate is not on the curve.
pub fn decompress_public_key(key: &RegisteredKey) -> Result<[u8; UNCOMPRESSED_KEY_SIZE]> {
    let compressed = decode_public_key(key);
    let point = k256::PublicKey::from_sec1_bytes(&compressed).map_err(|_| {
        AtelierError::InvalidKeyEncoding("stored key does not decompress to a curve point".into())
    })?;

    let uncompressed = point.to_encoded_point(false);
    let mut out = [0u8; UNCOMPRESSED_KEY_SIZE];
    out.copy_from_slice(uncompressed.as_bytes());
    Ok(out)
}

/// Derives the builder address for a registered key.
///
/// The address is the trailing 20 bytes of the Keccak-256 hash of the
/// uncompressed key without its tag byte.
pub fn derive_address(key: &RegisteredKey) -> Result<BuilderAddress> {
    let uncompressed = decompress_public_key(key)?;
    let hash = keccak256(&uncompressed[1..]);
    BuilderAddress::from_bytes(&hash[KECCAK256_SIZE - ADDRESS_SIZE..])
}
