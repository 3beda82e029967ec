//! Builder directory: the source of truth for who may act.
//!
//! Insertion-ordered array plus a by-address map. Builders are only ever
//! added in this registry's scope; no removal operation exists at any layer.

use std::collections::HashMap;

use atelier_core::error::{AtelierError, Result};
use atelier_core::types::{BuilderAddress, BuilderRecord};

#[derive(Debug, Default)]
pub(crate) struct BuilderDirectory {
    /// Insertion order of builder addresses.
    order: Vec<BuilderAddress>,
    /// Primary storage: address → record.
    by_address: HashMap<BuilderAddress, BuilderRecord>,
}

impl BuilderDirectory {
    /// O(1) membership test.
    pub fn contains(&self, address: &BuilderAddress) -> bool {
        self.by_address.contains_key(address)
    }

    /// O(1) lookup.
    pub fn get(&self, address: &BuilderAddress) -> Option<&BuilderRecord> {
        self.by_address.get(address)
    }

    /// O(1) mutable lookup, for in-place key replacement.
    pub fn get_mut(&mut self, address: &BuilderAddress) -> Option<&mut BuilderRecord> {
        self.by_address.get_mut(address)
    }

    /// Appends a record. Precondition (checked by the controller):
    /// `!contains(record.address)`.
    pub fn append(&mut self, record: BuilderRecord) {
        debug_assert!(!self.contains(&record.address));
        self.order.push(record.address);
        self.by_address.insert(record.address, record);
    }

    /// Number of registered builders.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Positional accessor into the insertion order.
    pub fn at(&self, index: usize) -> Result<BuilderAddress> {
        self.order
            .get(index)
            .copied()
            .ok_or(AtelierError::IndexOutOfRange {
                index,
                len: self.order.len(),
            })
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BuilderRecord> {
        self.order.iter().filter_map(|addr| self.by_address.get(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::types::RegisteredKey;

    fn record(n: u8) -> BuilderRecord {
        BuilderRecord::new(BuilderAddress::from_array([n; 20]), RegisteredKey::default())
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut directory = BuilderDirectory::default();
        directory.append(record(1));
        directory.append(record(2));
        directory.append(record(3));

        assert_eq!(directory.len(), 3);
        assert_eq!(directory.at(0).unwrap(), record(1).address);
        assert_eq!(directory.at(2).unwrap(), record(3).address);

        let ordered: Vec<_> = directory.iter().map(|r| r.address).collect();
        assert_eq!(
            ordered,
            vec![record(1).address, record(2).address, record(3).address]
        );
    }

    #[test]
    fn test_at_out_of_range() {
        let mut directory = BuilderDirectory::default();
        directory.append(record(1));

        assert!(matches!(
            directory.at(1),
            Err(AtelierError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_contains_and_get() {
        let mut directory = BuilderDirectory::default();
        directory.append(record(7));

        assert!(directory.contains(&record(7).address));
        assert!(!directory.contains(&record(8).address));
        assert_eq!(directory.get(&record(7).address), Some(&record(7)));
        assert_eq!(directory.get(&record(8).address), None);
    }
}
