//! Protocol constants for Atelier.
//!
//! Key sizes follow the SEC1 encoding of secp256k1 points; the registry
//! stores a key as its X coordinate plus a one-bit Y parity.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY SIZES (SEC1 / secp256k1)
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of the stored public key material in bytes (the X coordinate).
/// The Y coordinate is recovered from the parity bit.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of a SEC1 compressed public key (tag byte + X coordinate).
pub const COMPRESSED_KEY_SIZE: usize = 1 + PUBLIC_KEY_SIZE;

/// Size of a SEC1 uncompressed public key (tag byte + X + Y).
pub const UNCOMPRESSED_KEY_SIZE: usize = 1 + 2 * PUBLIC_KEY_SIZE;

/// SEC1 tag byte for a compressed point with even Y.
pub const SEC1_TAG_EVEN: u8 = 0x02;

/// SEC1 tag byte for a compressed point with odd Y.
pub const SEC1_TAG_ODD: u8 = 0x03;

/// SEC1 tag byte for an uncompressed point.
pub const SEC1_TAG_UNCOMPRESSED: u8 = 0x04;

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a builder address in bytes (20 bytes = 160 bits).
pub const ADDRESS_SIZE: usize = 20;

/// Size of a Keccak-256 hash output.
pub const KECCAK256_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT STORAGE
// ═══════════════════════════════════════════════════════════════════════════════

/// Download attempts before a transient timeout becomes a hard failure.
pub const DOWNLOAD_RETRY_ATTEMPTS: u32 = 5;

/// Delay between download retry attempts, in seconds.
pub const DOWNLOAD_RETRY_DELAY_SECS: u64 = 5;

/// Size of the AES-GCM nonce prepended to encrypted content.
pub const CONTENT_NONCE_SIZE: usize = 12;

/// Size of the symmetric secret used to decrypt stored content.
pub const CONTENT_SECRET_SIZE: usize = 32;
