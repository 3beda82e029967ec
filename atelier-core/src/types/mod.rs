//! Domain types for the Atelier registry.

mod address;
mod builder;
mod keys;

pub use address::BuilderAddress;
pub use builder::{BuilderRecord, JoinRequest};
pub use keys::{KeyParity, PublicKeyBytes, RegisteredKey};
