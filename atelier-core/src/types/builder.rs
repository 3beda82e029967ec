//! Builder records and join requests.

use serde::{Deserialize, Serialize};

use super::{BuilderAddress, KeyParity, PublicKeyBytes, RegisteredKey};

/// An authorized builder as stored in the directory.
///
/// Exactly one record exists per builder address; records are created by
/// `add_builder` or by accepting a join request, and never deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderRecord {
    /// The builder's identity.
    pub address: BuilderAddress,
    /// Y-coordinate parity of the registered key.
    pub parity: KeyParity,
    /// X coordinate of the registered key.
    pub public_key: PublicKeyBytes,
}

impl BuilderRecord {
    /// Creates a record binding `address` to `key`.
    pub fn new(address: BuilderAddress, key: RegisteredKey) -> Self {
        Self {
            address,
            parity: key.parity,
            public_key: key.public_key,
        }
    }

    /// Returns the registered key pair.
    pub fn key(&self) -> RegisteredKey {
        RegisteredKey::new(self.parity, self.public_key)
    }

    /// Replaces the registered key, leaving the address unchanged.
    pub fn set_key(&mut self, key: RegisteredKey) {
        self.parity = key.parity;
        self.public_key = key.public_key;
    }
}

/// A pending application to become a builder.
///
/// `index` caches the request's position in the queue's ordered array so
/// removal is O(1); the queue keeps it equal to the actual position at all
/// times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// The requesting address.
    pub address: BuilderAddress,
    /// Y-coordinate parity of the key captured at request time.
    pub parity: KeyParity,
    /// X coordinate of the key captured at request time.
    pub public_key: PublicKeyBytes,
    /// Current position in the queue's ordered array.
    pub index: usize,
}

impl JoinRequest {
    /// Creates a request for `address` at queue position `index`.
    pub fn new(address: BuilderAddress, key: RegisteredKey, index: usize) -> Self {
        Self {
            address,
            parity: key.parity,
            public_key: key.public_key,
            index,
        }
    }

    /// Returns the key pair captured at request time.
    pub fn key(&self) -> RegisteredKey {
        RegisteredKey::new(self.parity, self.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(fill: u8) -> RegisteredKey {
        RegisteredKey::new(KeyParity::Odd, PublicKeyBytes::from_array([fill; 32]))
    }

    #[test]
    fn test_record_carries_key() {
        let addr = BuilderAddress::from_array([1; 20]);
        let record = BuilderRecord::new(addr, test_key(0xAA));
        assert_eq!(record.address, addr);
        assert_eq!(record.key(), test_key(0xAA));
    }

    #[test]
    fn test_set_key_preserves_address() {
        let addr = BuilderAddress::from_array([1; 20]);
        let mut record = BuilderRecord::new(addr, test_key(0xAA));
        record.set_key(test_key(0xBB));
        assert_eq!(record.address, addr);
        assert_eq!(record.public_key, PublicKeyBytes::from_array([0xBB; 32]));
    }

    #[test]
    fn test_join_request_serde_roundtrip() {
        let request = JoinRequest::new(BuilderAddress::from_array([2; 20]), test_key(0x33), 7);
        let json = serde_json::to_string(&request).unwrap();
        let back: JoinRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
        assert_eq!(back.index, 7);
    }
}
