//! Symmetric content encryption.
//!
//! Artifacts are encrypted before upload and decrypted after retrieval with
//! AES-256-GCM. The wire form is `nonce (12 bytes) || ciphertext`; the nonce
//! is random per encryption.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use atelier_core::constants::{CONTENT_NONCE_SIZE, CONTENT_SECRET_SIZE};
use atelier_core::error::{AtelierError, Result};

/// Encrypts `plaintext` with a 32-byte secret.
///
/// Returns `nonce || ciphertext`.
pub fn encrypt_bytes(plaintext: &[u8], secret: &[u8; CONTENT_SECRET_SIZE]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(secret.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| AtelierError::InternalError("content encryption failed".into()))?;

    let mut out = Vec::with_capacity(CONTENT_NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypts `nonce || ciphertext` produced by [`encrypt_bytes`].
///
/// # Errors
/// `DecryptionFailed` if the input is too short or authentication fails
/// (wrong secret or tampered bytes).
pub fn decrypt_bytes(data: &[u8], secret: &[u8; CONTENT_SECRET_SIZE]) -> Result<Vec<u8>> {
    if data.len() < CONTENT_NONCE_SIZE {
        return Err(AtelierError::DecryptionFailed(format!(
            "content too short to carry a nonce: {} bytes",
            data.len()
        )));
    }

    let (nonce, ciphertext) = data.split_at(CONTENT_NONCE_SIZE);
    let cipher = Aes256Gcm::new(secret.into());

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| AtelierError::DecryptionFailed("authentication failed".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; CONTENT_SECRET_SIZE] = [7u8; CONTENT_SECRET_SIZE];

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"model weights, round 3";
        let encrypted = encrypt_bytes(plaintext, &SECRET).unwrap();

        assert_ne!(&encrypted[CONTENT_NONCE_SIZE..], plaintext.as_slice());
        let decrypted = decrypt_bytes(&encrypted, &SECRET).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_nonces_are_unique() {
        let a = encrypt_bytes(b"same input", &SECRET).unwrap();
        let b = encrypt_bytes(b"same input", &SECRET).unwrap();
        assert_ne!(a[..CONTENT_NONCE_SIZE], b[..CONTENT_NONCE_SIZE]);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let encrypted = encrypt_bytes(b"payload", &SECRET).unwrap();
        let wrong = [8u8; CONTENT_SECRET_SIZE];

        let result = decrypt_bytes(&encrypted, &wrong);
        assert!(matches!(result, Err(AtelierError::DecryptionFailed(_))));
    }

    #[test]
    fn test_truncated_input_fails() {
        let result = decrypt_bytes(&[0u8; 4], &SECRET);
        assert!(matches!(result, Err(AtelierError::DecryptionFailed(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut encrypted = encrypt_bytes(b"payload", &SECRET).unwrap();
        let last = encrypted.len() - 1;
        encrypted[last] ^= 0x01;

        let result = decrypt_bytes(&encrypted, &SECRET);
        assert!(matches!(result, Err(AtelierError::DecryptionFailed(_))));
    }
}
