//! # Atelier Keys
//!
//! Identity codec for the Atelier registry.
//!
//! The registry stores a builder's public key in a recoverable two-part form:
//! the 32-byte X coordinate plus a one-bit Y parity. This crate converts
//! between that stored form and the usual SEC1 encodings, derives registry
//! addresses, and generates fresh key material for the CLI:
//!
//! - [`encode_public_key`]: raw SEC1 hex → `(parity, key bytes)`
//! - [`decode_public_key`] / [`decompress_public_key`]: the inverse direction
//! - [`export_public_key`]: private scalar hex → `(parity, key bytes)`
//! - [`derive_address`]: registered key → 20-byte builder address
//! - [`generate_keypair`]: fresh random identity
//!
//! All functions are pure; the registry itself never calls into this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod codec;
mod hash;

pub use codec::{
    decode_public_key, decompress_public_key, derive_address, encode_public_key,
    export_public_key, generate_keypair, SigningSecret,
};
pub use hash::keccak256;
