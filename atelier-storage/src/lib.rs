//! # Atelier Storage
//!
//! Content-addressed storage for project artifacts (model weights, shared
//! data). Bytes go up through the storage API and come back through a public
//! gateway; retrieval absorbs transient read-timeouts with a bounded retry,
//! and retrieved bytes can optionally be decrypted and persisted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use atelier_storage::{ContentStorage, StorageConfig};
//!
//! let storage = ContentStorage::with_config(StorageConfig::from_env());
//! let cid = storage.upload(b"weights").await?;
//! let bytes = storage.download(&cid).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod crypt;
mod store;

pub use crypt::{decrypt_bytes, encrypt_bytes};
pub use store::{ContentStorage, StorageConfig};

// Re-export the trait from core
pub use atelier_core::traits::ContentStore;
