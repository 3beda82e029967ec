//! Error types for Atelier.
//!
//! One `thiserror` hierarchy covers the registry's rejection reasons and the
//! collaborator failures around it. Registry operations fail fast on the
//! first violated precondition and never mutate state on a failure path.

use thiserror::Error;

/// Result type alias using `AtelierError`.
pub type Result<T> = std::result::Result<T, AtelierError>;

/// Main error type for all Atelier operations.
#[derive(Debug, Error)]
pub enum AtelierError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY REJECTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Caller lacks builder status.
    #[error("only builders are allowed to execute this")]
    NotBuilder,

    /// Target address is already a registered builder.
    #[error("builder already exists")]
    BuilderExists,

    /// Target address already has a pending join request.
    #[error("builder already requested to join")]
    AlreadyRequested,

    /// Operation targets an address with no pending join request.
    #[error("address has not created a join request; use add_builder instead")]
    NoSuchRequest,

    /// Positional accessor past the end of the collection.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // IDENTITY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed public or private key input.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Malformed builder address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONTENT STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Content upload failed (network or auth error). Never retried.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// Content download failed after exhausting retries.
    #[error("download failed for content '{cid}': {reason}")]
    DownloadFailed {
        /// The content identifier that could not be retrieved.
        cid: String,
        /// Why the final attempt failed.
        reason: String,
    },

    /// Malformed content identifier.
    #[error("invalid content id: {0}")]
    InvalidCid(String),

    /// Retrieved content could not be decrypted with the supplied secret.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid hex encoding.
    #[error("invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // AMBIENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AtelierError {
    /// Returns true if this is a registry rejection — an operation refused by
    /// a precondition check, leaving state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AtelierError::NotBuilder
                | AtelierError::BuilderExists
                | AtelierError::AlreadyRequested
                | AtelierError::NoSuchRequest
                | AtelierError::IndexOutOfRange { .. }
        )
    }

    /// Returns true if this error is recoverable (a retry may succeed).
    ///
    /// Registry rejections are deterministic and never recoverable; only
    /// transport-level failures qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AtelierError::HttpError(_))
    }
}
