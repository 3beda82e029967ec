//! Keccak-256 hashing for address derivation.

use sha3::{Digest, Keccak256};

use atelier_core::constants::KECCAK256_SIZE;

/// Computes a Keccak-256 hash.
///
/// Note: Keccak-256 is NOT SHA3-256. They use different padding.
pub fn keccak256(input: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    Digest::update(&mut hasher, input);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_input() {
        // Well-known Keccak-256 of the empty string
        let hash = keccak256(b"");
        assert_eq!(
            hex::encode(hash),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_is_not_sha3() {
        // SHA3-256("") starts with a7ffc6f8; Keccak-256 must differ
        let hash = keccak256(b"");
        assert_ne!(hash[0], 0xA7);
    }
}
