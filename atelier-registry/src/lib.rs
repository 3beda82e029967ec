//! # Atelier Registry
//!
//! The builder membership state machine: who may act, who has asked to join.
//!
//! Two collections back the registry, each an ordered array plus a
//! by-address map kept transactionally consistent:
//!
//! - **Builder directory**: append-only roster of authorized builders
//! - **Join-request queue**: pending applications, removable in O(1) via
//!   swap-and-truncate
//!
//! Both are owned exclusively by [`BuilderRegistry`], which serializes every
//! mutation behind one writer lock so each public operation is atomic.
//!
//! ## Example
//!
//! ```rust
//! use atelier_core::{BuilderAddress, BuilderRecord, RegisteredKey};
//! use atelier_registry::BuilderRegistry;
//!
//! let owner = BuilderAddress::from_array([1; 20]);
//! let registry = BuilderRegistry::new(BuilderRecord::new(owner, RegisteredKey::default()));
//!
//! let applicant = BuilderAddress::from_array([2; 20]);
//! registry.request_join(applicant, RegisteredKey::default()).unwrap();
//! registry.accept_join_request(owner, applicant).unwrap();
//! assert!(registry.is_builder(applicant));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod controller;
mod directory;
mod queue;

pub use controller::{BuilderRegistry, RegistryStats};
