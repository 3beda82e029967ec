//! # Atelier Core
//!
//! Core types, errors, and traits for the Atelier builder membership registry.
//!
//! This crate provides the foundational building blocks used by all other
//! Atelier crates:
//!
//! - **Types**: Domain models for builder addresses, registered keys, builder
//!   records, and join requests
//! - **Errors**: One error taxonomy covering registry rejections and
//!   collaborator failures
//! - **Constants**: Key sizes and retry bounds
//! - **Traits**: The content-storage collaborator seam
//!
//! ## Example
//!
//! ```rust
//! use atelier_core::{BuilderAddress, BuilderRecord, RegisteredKey};
//!
//! let address: BuilderAddress = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
//!     .parse()
//!     .unwrap();
//! let record = BuilderRecord::new(address, RegisteredKey::default());
//! assert_eq!(record.address, address);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{AtelierError, Result};
pub use traits::*;
pub use types::*;
