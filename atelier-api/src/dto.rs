//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use atelier_core::types::{
    BuilderAddress, BuilderRecord, JoinRequest, KeyParity, PublicKeyBytes,
};
use atelier_registry::RegistryStats;

/// A registered builder.
#[derive(Debug, Serialize)]
pub struct BuilderDto {
    /// Builder address (`0x…` hex).
    pub address: BuilderAddress,
    /// Y-parity bit of the registered key.
    pub parity: KeyParity,
    /// X coordinate of the registered key (hex).
    pub public_key: PublicKeyBytes,
}

impl From<BuilderRecord> for BuilderDto {
    fn from(record: BuilderRecord) -> Self {
        Self {
            address: record.address,
            parity: record.parity,
            public_key: record.public_key,
        }
    }
}

/// A pending join request.
#[derive(Debug, Serialize)]
pub struct JoinRequestDto {
    /// Requester address.
    pub address: BuilderAddress,
    /// Y-parity bit of the key captured at request time.
    pub parity: KeyParity,
    /// X coordinate of the key captured at request time (hex).
    pub public_key: PublicKeyBytes,
    /// Current queue position.
    pub index: usize,
}

impl From<JoinRequest> for JoinRequestDto {
    fn from(request: JoinRequest) -> Self {
        Self {
            address: request.address,
            parity: request.parity,
            public_key: request.public_key,
            index: request.index,
        }
    }
}

/// Request body for direct builder addition.
#[derive(Debug, Deserialize)]
pub struct AddBuilderBody {
    /// Address to register.
    pub address: BuilderAddress,
    /// Y-parity bit of the new builder's key.
    pub parity: KeyParity,
    /// X coordinate of the new builder's key (hex).
    pub public_key: PublicKeyBytes,
}

/// Request body carrying only a key pair (set-key, request-join).
#[derive(Debug, Deserialize)]
pub struct KeyBody {
    /// Y-parity bit.
    pub parity: KeyParity,
    /// X coordinate (hex).
    pub public_key: PublicKeyBytes,
}

/// Response listing registered builders in registration order.
#[derive(Debug, Serialize)]
pub struct ListBuildersResponse {
    /// The builders.
    pub builders: Vec<BuilderDto>,
}

/// Response listing pending join requests in current queue order.
#[derive(Debug, Serialize)]
pub struct ListRequestsResponse {
    /// The pending requests.
    pub requests: Vec<JoinRequestDto>,
}

/// Registry counters.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of registered builders.
    pub builders: usize,
    /// Number of pending join requests.
    pub pending_requests: usize,
}

impl From<RegistryStats> for StatsResponse {
    fn from(stats: RegistryStats) -> Self {
        Self {
            builders: stats.builders,
            pending_requests: stats.pending_requests,
        }
    }
}
