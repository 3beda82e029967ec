//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::{debug, info};

use atelier_core::types::{BuilderAddress, RegisteredKey};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Header carrying the caller's address on every operation.
pub const CALLER_HEADER: &str = "x-atelier-caller";

/// Extracts the caller identity from the request headers.
fn caller(headers: &HeaderMap) -> Result<BuilderAddress> {
    let value = headers
        .get(CALLER_HEADER)
        .ok_or_else(|| ApiError::bad_request(format!("missing {CALLER_HEADER} header")))?;
    let raw = value
        .to_str()
        .map_err(|_| ApiError::bad_request("caller header is not valid UTF-8"))?;
    raw.parse()
        .map_err(|e| ApiError::bad_request(format!("invalid caller address: {e}")))
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/builders
pub async fn list_builders(State(state): State<Arc<AppState>>) -> Json<ListBuildersResponse> {
    let builders = state
        .registry
        .builders()
        .into_iter()
        .map(BuilderDto::from)
        .collect();
    Json(ListBuildersResponse { builders })
}

/// GET /api/v1/builders/:address
pub async fn get_builder(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<BuilderDto>> {
    let address: BuilderAddress = address
        .parse()
        .map_err(|e| ApiError::bad_request(format!("invalid address: {e}")))?;

    state
        .registry
        .builder(address)
        .map(|record| Json(BuilderDto::from(record)))
        .ok_or_else(|| ApiError::not_found(format!("no builder registered at {address}")))
}

/// POST /api/v1/builders
pub async fn add_builder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AddBuilderBody>,
) -> Result<Json<BuilderDto>> {
    let caller = caller(&headers)?;
    let key = RegisteredKey::new(body.parity, body.public_key);

    state.registry.add_builder(caller, body.address, key)?;
    info!(address = %body.address, added_by = %caller, "builder added");

    // the record must exist now; a miss would be an internal fault
    state
        .registry
        .builder(body.address)
        .map(|record| Json(BuilderDto::from(record)))
        .ok_or_else(|| ApiError::internal("builder vanished after insertion"))
}

/// PUT /api/v1/builders/key
pub async fn set_builder_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<KeyBody>,
) -> Result<Json<BuilderDto>> {
    let caller = caller(&headers)?;
    let key = RegisteredKey::new(body.parity, body.public_key);

    state.registry.set_builder_public_key(caller, key)?;
    debug!(builder = %caller, "registered key replaced");

    state
        .registry
        .builder(caller)
        .map(|record| Json(BuilderDto::from(record)))
        .ok_or_else(|| ApiError::internal("builder vanished after key update"))
}

/// GET /api/v1/requests
pub async fn list_requests(State(state): State<Arc<AppState>>) -> Json<ListRequestsResponse> {
    let requests = state
        .registry
        .join_requests()
        .into_iter()
        .map(JoinRequestDto::from)
        .collect();
    Json(ListRequestsResponse { requests })
}

/// POST /api/v1/requests
pub async fn request_join(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<KeyBody>,
) -> Result<Json<JoinRequestDto>> {
    let caller = caller(&headers)?;
    let key = RegisteredKey::new(body.parity, body.public_key);

    state.registry.request_join(caller, key)?;
    info!(requester = %caller, "join requested");

    state
        .registry
        .join_request(caller)
        .map(|request| Json(JoinRequestDto::from(request)))
        .ok_or_else(|| ApiError::internal("request vanished after insertion"))
}

/// POST /api/v1/requests/:address/accept
pub async fn accept_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(address): Path<String>,
) -> Result<Json<BuilderDto>> {
    let caller = caller(&headers)?;
    let address: BuilderAddress = address
        .parse()
        .map_err(|e| ApiError::bad_request(format!("invalid address: {e}")))?;

    let record = state.registry.accept_join_request(caller, address)?;
    info!(%address, accepted_by = %caller, "join request accepted");

    Ok(Json(BuilderDto::from(record)))
}

/// POST /api/v1/requests/:address/decline
pub async fn decline_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let caller = caller(&headers)?;
    let address: BuilderAddress = address
        .parse()
        .map_err(|e| ApiError::bad_request(format!("invalid address: {e}")))?;

    state.registry.decline_join_request(caller, address)?;
    info!(%address, declined_by = %caller, "join request declined");

    Ok(Json(serde_json::json!({ "declined": address })))
}

/// GET /api/v1/registry/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.registry.stats()))
}
