//! Join-request queue with O(1) removal.
//!
//! Same array-plus-map shape as the directory, with one addition: each
//! request caches its own array position so removal can swap the last entry
//! into the freed slot and truncate. Removal therefore does not preserve
//! insertion order among the remaining entries; callers are not promised
//! FIFO order.

use std::collections::HashMap;

use atelier_core::error::{AtelierError, Result};
use atelier_core::types::{BuilderAddress, JoinRequest, RegisteredKey};

#[derive(Debug, Default)]
pub(crate) struct JoinRequestQueue {
    /// Current order of pending requesters.
    order: Vec<BuilderAddress>,
    /// Primary storage: address → request, with cached position.
    by_address: HashMap<BuilderAddress, JoinRequest>,
}

impl JoinRequestQueue {
    /// O(1) membership test.
    pub fn contains(&self, address: &BuilderAddress) -> bool {
        self.by_address.contains_key(address)
    }

    /// O(1) lookup.
    pub fn get(&self, address: &BuilderAddress) -> Option<&JoinRequest> {
        self.by_address.get(address)
    }

    /// Appends a request at the tail. Precondition (checked by the
    /// controller): `!contains(address)`.
    pub fn push(&mut self, address: BuilderAddress, key: RegisteredKey) {
        debug_assert!(!self.contains(&address));
        let request = JoinRequest::new(address, key, self.order.len());
        self.order.push(address);
        self.by_address.insert(address, request);
    }

    /// Swap-and-truncate removal.
    ///
    /// Moves the last entry into the removed slot (fixing its cached index),
    /// then shrinks the array. O(1) regardless of position.
    pub fn remove(&mut self, address: &BuilderAddress) -> Option<JoinRequest> {
        let removed = self.by_address.remove(address)?;
        let last = self.order.len() - 1;

        if removed.index != last {
            let moved = self.order[last];
            self.order[removed.index] = moved;
            // the moved entry's cached index must track its new slot
            if let Some(entry) = self.by_address.get_mut(&moved) {
                entry.index = removed.index;
            }
        }

        self.order.truncate(last);
        Some(removed)
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Positional accessor into the current order.
    pub fn at(&self, index: usize) -> Result<BuilderAddress> {
        self.order
            .get(index)
            .copied()
            .ok_or(AtelierError::IndexOutOfRange {
                index,
                len: self.order.len(),
            })
    }

    /// Iterates requests in current array order.
    pub fn iter(&self) -> impl Iterator<Item = &JoinRequest> {
        self.order.iter().filter_map(|addr| self.by_address.get(addr))
    }
}
