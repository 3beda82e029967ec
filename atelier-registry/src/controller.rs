//! Registry controller: the public operations over directory and queue.
//!
//! Every mutating operation checks caller authorization first (the caller
//! must already be a builder), then its preconditions in a fixed order, and
//! only then mutates — so a failure leaves both collections untouched and
//! the reported reason is always the first violated check.
//!
//! All mutations run under one writer lock for their full span, reproducing
//! the single-threaded transaction guarantee the original ledger host
//! provided. Accessors take the read lock and see consistent snapshots.

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, instrument};

use atelier_core::error::{AtelierError, Result};
use atelier_core::types::{BuilderAddress, BuilderRecord, JoinRequest, RegisteredKey};

use crate::directory::BuilderDirectory;
use crate::queue::JoinRequestQueue;

/// Point-in-time registry counters.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RegistryStats {
    /// Number of registered builders.
    pub builders: usize,
    /// Number of pending join requests.
    pub pending_requests: usize,
}

#[derive(Debug, Default)]
struct RegistryState {
    directory: BuilderDirectory,
    queue: JoinRequestQueue,
}

/// The builder membership registry.
///
/// Owns the builder directory and the join-request queue; nothing else may
/// mutate them. Constructed with the founding builder, who bootstraps the
/// authorization chain.
#[derive(Debug)]
pub struct BuilderRegistry {
    state: RwLock<RegistryState>,
}

impl BuilderRegistry {
    /// Creates a registry seeded with the founding builder.
    pub fn new(founder: BuilderRecord) -> Self {
        let mut state = RegistryState::default();
        state.directory.append(founder);
        debug!(founder = %founder.address, "registry initialized");

        Self {
            state: RwLock::new(state),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATING OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Directly registers `address` as a builder.
    ///
    /// # Errors
    /// - `NotBuilder` if `caller` is not a builder
    /// - `BuilderExists` if `address` is already registered
    /// - `AlreadyRequested` if `address` has a pending join request (the
    ///   request must be accepted or declined instead, keeping the builder
    ///   and pending sets disjoint)
    #[instrument(skip(self, key))]
    pub fn add_builder(
        &self,
        caller: BuilderAddress,
        address: BuilderAddress,
        key: RegisteredKey,
    ) -> Result<()> {
        let mut state = self.state.write();

        if !state.directory.contains(&caller) {
            return Err(AtelierError::NotBuilder);
        }
        if state.directory.contains(&address) {
            return Err(AtelierError::BuilderExists);
        }
        if state.queue.contains(&address) {
            return Err(AtelierError::AlreadyRequested);
        }

        state.directory.append(BuilderRecord::new(address, key));
        debug!(%address, "builder added");
        Ok(())
    }

    /// Replaces the caller's own registered key; the address is unchanged.
    ///
    /// # Errors
    /// `NotBuilder` if `caller` is not a builder.
    #[instrument(skip(self, key))]
    pub fn set_builder_public_key(
        &self,
        caller: BuilderAddress,
        key: RegisteredKey,
    ) -> Result<()> {
        let mut state = self.state.write();

        let record = state
            .directory
            .get_mut(&caller)
            .ok_or(AtelierError::NotBuilder)?;
        record.set_key(key);

        debug!(builder = %caller, "public key replaced");
        Ok(())
    }

    /// Applies to join as a builder. Callable by anyone not yet a builder or
    /// pending requester.
    ///
    /// # Errors
    /// - `BuilderExists` if `caller` is already a builder (this check takes
    ///   precedence)
    /// - `AlreadyRequested` if `caller` already has a pending request
    #[instrument(skip(self, key))]
    pub fn request_join(&self, caller: BuilderAddress, key: RegisteredKey) -> Result<()> {
        let mut state = self.state.write();

        if state.directory.contains(&caller) {
            return Err(AtelierError::BuilderExists);
        }
        if state.queue.contains(&caller) {
            return Err(AtelierError::AlreadyRequested);
        }

        state.queue.push(caller, key);
        debug!(requester = %caller, pending = state.queue.len(), "join requested");
        Ok(())
    }

    /// Accepts a pending join request: removes it from the queue and
    /// registers the requester with the key captured at request time.
    ///
    /// # Errors
    /// - `NotBuilder` if `caller` is not a builder
    /// - `NoSuchRequest` if `address` has no pending request
    #[instrument(skip(self))]
    pub fn accept_join_request(
        &self,
        caller: BuilderAddress,
        address: BuilderAddress,
    ) -> Result<BuilderRecord> {
        let mut state = self.state.write();

        if !state.directory.contains(&caller) {
            return Err(AtelierError::NotBuilder);
        }
        let request = state
            .queue
            .remove(&address)
            .ok_or(AtelierError::NoSuchRequest)?;

        let record = BuilderRecord::new(request.address, request.key());
        state.directory.append(record);

        debug!(%address, accepted_by = %caller, "join request accepted");
        Ok(record)
    }

    /// Declines a pending join request, removing it from the queue.
    ///
    /// # Errors
    /// - `NotBuilder` if `caller` is not a builder
    /// - `NoSuchRequest` if `address` has no pending request
    #[instrument(skip(self))]
    pub fn decline_join_request(
        &self,
        caller: BuilderAddress,
        address: BuilderAddress,
    ) -> Result<()> {
        let mut state = self.state.write();

        if !state.directory.contains(&caller) {
            return Err(AtelierError::NotBuilder);
        }
        state
            .queue
            .remove(&address)
            .ok_or(AtelierError::NoSuchRequest)?;

        debug!(%address, declined_by = %caller, "join request declined");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns true if `address` is a registered builder.
    pub fn is_builder(&self, address: BuilderAddress) -> bool {
        self.state.read().directory.contains(&address)
    }

    /// Returns the record for `address`, if registered.
    pub fn builder(&self, address: BuilderAddress) -> Option<BuilderRecord> {
        self.state.read().directory.get(&address).copied()
    }

    /// Number of registered builders.
    pub fn builders_len(&self) -> usize {
        self.state.read().directory.len()
    }

    /// Builder address at position `index` in registration order.
    pub fn builder_at(&self, index: usize) -> Result<BuilderAddress> {
        self.state.read().directory.at(index)
    }

    /// All builder records in registration order.
    pub fn builders(&self) -> Vec<BuilderRecord> {
        self.state.read().directory.iter().copied().collect()
    }

    /// Returns the pending request for `address`, if any.
    pub fn join_request(&self, address: BuilderAddress) -> Option<JoinRequest> {
        self.state.read().queue.get(&address).copied()
    }

    /// Number of pending join requests.
    pub fn requests_len(&self) -> usize {
        self.state.read().queue.len()
    }

    /// Requester address at position `index` in the queue's current order.
    pub fn request_at(&self, index: usize) -> Result<BuilderAddress> {
        self.state.read().queue.at(index)
    }

    /// All pending requests in current queue order.
    pub fn join_requests(&self) -> Vec<JoinRequest> {
        self.state.read().queue.iter().copied().collect()
    }

    /// Point-in-time counters for both collections.
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.read();
        RegistryStats {
            builders: state.directory.len(),
            pending_requests: state.queue.len(),
        }
    }
}
