//! Common traits for Atelier.
//!
//! The registry itself is a concrete state machine; the only seam that needs
//! a trait is the content-storage collaborator, which has real alternative
//! implementations (HTTP gateway in production, mocks in tests).

use async_trait::async_trait;

use crate::error::Result;

/// Interface for content-addressed storage.
///
/// Implementations store opaque bytes and hand back an identifier that can
/// later retrieve them. Upload failures are terminal; download
/// implementations are expected to absorb transient timeouts internally.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stores bytes and returns the content identifier.
    async fn upload(&self, data: &[u8]) -> Result<String>;

    /// Retrieves bytes by content identifier.
    async fn download(&self, cid: &str) -> Result<Vec<u8>>;
}
