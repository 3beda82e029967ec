//! # Atelier API Server
//!
//! HTTP front end for the builder registry. Every operation of the registry
//! is exposed as a named route with typed JSON arguments; the caller's
//! identity travels in the `x-atelier-caller` header and is checked against
//! the directory on every mutation, exactly as the registry itself demands.
//!
//! ## Endpoints
//!
//! - `GET  /health` - Liveness check
//! - `GET  /api/v1/builders` - List registered builders
//! - `POST /api/v1/builders` - Directly add a builder (builders only)
//! - `PUT  /api/v1/builders/key` - Replace the caller's registered key
//! - `GET  /api/v1/builders/:address` - Look up one builder
//! - `GET  /api/v1/requests` - List pending join requests
//! - `POST /api/v1/requests` - Apply to join
//! - `POST /api/v1/requests/:address/accept` - Accept a request (builders only)
//! - `POST /api/v1/requests/:address/decline` - Decline a request (builders only)
//! - `GET  /api/v1/registry/stats` - Registry counters
//!
//! ## Example
//!
//! ```rust,ignore
//! use atelier_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::CALLER_HEADER;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use atelier_core::error::Result;

/// API server for the Atelier registry.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    ///
    /// # Errors
    /// `ConfigError` or `InvalidKeyEncoding` if the founding builder cannot
    /// be constructed from the configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Atelier API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with environment-derived configuration.
pub async fn start_server(port: u16) -> Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config)?;
    server.run(([0, 0, 0, 0], port)).await?;
    Ok(())
}
